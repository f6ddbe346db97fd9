//! Themes shipped with the engine

use std::collections::BTreeMap;

use super::classes::{ControlClasses, FeedbackClasses, FieldClasses, Theme};

pub const BOOTSTRAP4: &str = "bootstrap4";
pub const PLAIN: &str = "plain";

/// Bootstrap 4 class names
pub fn bootstrap4() -> Theme {
    Theme {
        name: BOOTSTRAP4.to_string(),
        field: FieldClasses {
            row: "form-row".into(),
            wrapper: "form-group".into(),
            column_prefix: "col-md-".into(),
            label: String::new(),
            input: "form-control".into(),
            select: "form-control custom-select".into(),
            textarea: "form-control".into(),
            file: "form-control-file".into(),
            check_wrapper: "custom-control custom-checkbox".into(),
            switch_wrapper: "custom-control custom-switch".into(),
            check_input: "custom-control-input".into(),
            check_label: "custom-control-label".into(),
            helptext: "form-text text-muted".into(),
            valid: "is-valid".into(),
            invalid: "is-invalid".into(),
            size_small: "form-control-sm".into(),
            size_large: "form-control-lg".into(),
            list_header: "d-flex justify-content-between".into(),
            list_items: "list-items".into(),
            list_row: "form-row list-row".into(),
            diagnostic: "alert alert-warning".into(),
        },
        feedback: FeedbackClasses {
            valid: "valid-feedback".into(),
            invalid: "invalid-feedback".into(),
        },
        controls: ControlClasses {
            wrapper: "form-controls".into(),
            submit: "btn btn-primary".into(),
            cancel: "btn btn-secondary".into(),
            add: "btn btn-success btn-block".into(),
            remove: "btn btn-outline-danger btn-block".into(),
            align_left: "text-left".into(),
            align_center: "text-center".into(),
            align_right: "text-right".into(),
            loader: "spinner-border".into(),
            reveal: "fade show".into(),
        },
        extra: BTreeMap::from([("radio_inline".to_string(), "custom-control-inline".to_string())]),
    }
}

/// No class names at all
pub fn plain() -> Theme {
    Theme {
        name: PLAIN.to_string(),
        ..Theme::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonform_core::FieldSize;

    #[test]
    fn test_bootstrap_column_and_size_classes() {
        let theme = bootstrap4();
        assert_eq!(theme.column_class(6), "col-md-6");
        assert_eq!(theme.size_class(FieldSize::Small), "form-control-sm");
        assert_eq!(theme.size_class(FieldSize::Normal), "");
        assert_eq!(theme.extra("radio_inline"), Some("custom-control-inline"));
    }

    #[test]
    fn test_plain_theme_is_empty() {
        let theme = plain();
        assert_eq!(theme.column_class(6), "");
        assert!(theme.field.input.is_empty());
        assert!(theme.controls.submit.is_empty());
    }
}
