use crate::values::FlatValues;
use serde_json::Value;
use tracing::error;

pub const SUBMIT_ERROR_TITLE: &str = "Error Submitting Proposal";

/// Payload for the user-facing error notification callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToast {
    pub title: String,
    pub description: String,
}

/// Failure context gathered at the submission boundary. Every field is
/// optional; the reporter works with whatever the caller still has.
#[derive(Debug, Default)]
pub struct FormErrorReport<'a> {
    pub error: Option<&'a anyhow::Error>,
    pub context_data: Option<&'a Value>,
    pub form_data: Option<&'a Value>,
    pub args: Option<&'a Value>,
    pub values: Option<&'a FlatValues>,
}

/// Absorbs a failed form submission: resets the loading state, emits one
/// structured error record, and raises the user-facing toast.
///
/// The original error is not rethrown and this never panics; the
/// reporter sits at the user-facing boundary and is the one place where
/// failures terminate.
pub fn handle_form_error(
    report: &FormErrorReport<'_>,
    loading: Option<&mut dyn FnMut(bool)>,
    error_toast: Option<&mut dyn FnMut(ErrorToast)>,
) {
    let err_msg = report
        .error
        .map(|error| error.to_string())
        .unwrap_or_default();

    if let Some(loading) = loading {
        loading(false);
    }

    error!(
        context_data = ?report.context_data,
        form_data = ?report.form_data,
        args = ?report.args,
        values = ?report.values,
        err_msg = %err_msg,
        "Form submission failed"
    );

    if let Some(error_toast) = error_toast {
        error_toast(ErrorToast {
            title: SUBMIT_ERROR_TITLE.to_string(),
            description: err_msg,
        });
    }
}
