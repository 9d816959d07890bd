// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery state machine.
//!
//! Transitions are monotonic through pending → pickedup → onway →
//! {delivered | failed}; cylinder purchases skip the pickup leg. Every
//! guard is checked before any mutation, so a rejected action leaves the
//! order untouched.

use crate::code::ConfirmCode;
use crate::order::{DeliveryStatus, Order, OrderKind};
use thiserror::Error;

/// A driver action against a single order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryAction {
    /// Collect the empty cylinder (refill flow only)
    StartPickup,
    /// Head out for delivery
    StartDelivery,
    /// Hand over, confirmed by the customer's code
    ConfirmDelivery(String),
    /// Abandon the delivery with an explanatory note
    MarkFailed(String),
}

/// Tag-only variant of [`DeliveryAction`] for UI button rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    StartPickup,
    StartDelivery,
    ConfirmDelivery,
    MarkFailed,
}

impl From<&DeliveryAction> for ActionKind {
    fn from(action: &DeliveryAction) -> Self {
        match action {
            DeliveryAction::StartPickup => ActionKind::StartPickup,
            DeliveryAction::StartDelivery => ActionKind::StartDelivery,
            DeliveryAction::ConfirmDelivery(_) => ActionKind::ConfirmDelivery,
            DeliveryAction::MarkFailed(_) => ActionKind::MarkFailed,
        }
    }
}

crate::simple_display! {
    ActionKind {
        StartPickup => "start pickup",
        StartDelivery => "start delivery",
        ConfirmDelivery => "confirm delivery",
        MarkFailed => "mark failed",
    }
}

/// Why a transition was rejected. Rejections never mutate the order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("order is already {status}; no further transitions")]
    Terminal { status: DeliveryStatus },
    #[error("cannot {action} while order is {status}")]
    InvalidAction { status: DeliveryStatus, action: ActionKind },
    #[error("pickup does not apply to a cylinder purchase")]
    PickupNotApplicable,
    #[error("refill orders must be picked up before heading out")]
    PickupRequired,
    #[error("confirmation code must be exactly {0} digits")]
    MalformedCode(usize),
    #[error("confirmation code does not match")]
    CodeMismatch,
    #[error("a failure note is required")]
    EmptyNote,
}

/// Apply a driver action to an order, enforcing the transition table.
///
/// On success the order's status (and failure note, where applicable) is
/// updated in place and the new status returned. On rejection the order
/// is left exactly as it was.
pub fn advance(order: &mut Order, action: &DeliveryAction) -> Result<DeliveryStatus, TransitionError> {
    if order.status.is_terminal() {
        return Err(TransitionError::Terminal { status: order.status });
    }

    let next = match (order.status, action) {
        (DeliveryStatus::Pending, DeliveryAction::StartPickup) => {
            if order.kind == OrderKind::CylinderPurchase {
                return Err(TransitionError::PickupNotApplicable);
            }
            DeliveryStatus::PickedUp
        }
        (DeliveryStatus::Pending, DeliveryAction::StartDelivery) => {
            if order.kind == OrderKind::Refill {
                return Err(TransitionError::PickupRequired);
            }
            DeliveryStatus::OnWay
        }
        (DeliveryStatus::PickedUp, DeliveryAction::StartDelivery) => DeliveryStatus::OnWay,
        (DeliveryStatus::OnWay, DeliveryAction::ConfirmDelivery(entered)) => {
            let code = ConfirmCode::parse(entered)
                .map_err(|_| TransitionError::MalformedCode(ConfirmCode::LEN))?;
            if code != order.code {
                return Err(TransitionError::CodeMismatch);
            }
            DeliveryStatus::Delivered
        }
        (DeliveryStatus::OnWay, DeliveryAction::MarkFailed(note)) => {
            let note = note.trim();
            if note.is_empty() {
                return Err(TransitionError::EmptyNote);
            }
            order.failed_note = Some(note.to_string());
            DeliveryStatus::Failed
        }
        (status, action) => {
            return Err(TransitionError::InvalidAction { status, action: action.into() })
        }
    };

    order.status = next;
    Ok(next)
}

/// Actions valid for the order's current state; what the UI should render.
pub fn allowed_actions(order: &Order) -> Vec<ActionKind> {
    match (order.status, order.kind) {
        (DeliveryStatus::Pending, OrderKind::Refill) => vec![ActionKind::StartPickup],
        (DeliveryStatus::Pending, OrderKind::CylinderPurchase) => {
            vec![ActionKind::StartDelivery]
        }
        (DeliveryStatus::PickedUp, _) => vec![ActionKind::StartDelivery],
        (DeliveryStatus::OnWay, _) => {
            vec![ActionKind::ConfirmDelivery, ActionKind::MarkFailed]
        }
        (DeliveryStatus::Delivered | DeliveryStatus::Failed, _) => Vec::new(),
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
