//! Short-lived user-facing messages for account operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
}

impl Toast {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

pub trait ToastPresenter: Send + Sync {
    fn show_toast(&self, toast: Toast);
}
