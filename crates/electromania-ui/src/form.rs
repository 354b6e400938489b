//! Form schemas and field-scoped validation.
//!
//! A [`Schema`] lists the fields of one form and the rules each must pass.
//! [`Form`] holds the transient values of a single fill-in: it tracks which
//! fields were touched, validates one field on blur and every field on
//! submit, and hands valid values to a [`SubmitHandler`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::submit::{FormKind, SubmitError, SubmitHandler, Submission};

/// Field name to entered value.
pub type FormValues = BTreeMap<String, String>;

/// WHATWG "valid e-mail address".
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid email regex")
});

/// Whether `value` is a well-formed email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// A validation rule attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must be non-empty
    Required { message: &'static str },
    /// Non-empty value must be an email address
    Email { message: &'static str },
}

impl FieldRule {
    fn check(&self, value: &str) -> Option<(ValidationKind, &'static str)> {
        match self {
            FieldRule::Required { message } if value.is_empty() => {
                Some((ValidationKind::Required, *message))
            }
            FieldRule::Email { message } if !value.is_empty() && !is_valid_email(value) => {
                Some((ValidationKind::InvalidEmail, *message))
            }
            _ => None,
        }
    }
}

/// How a field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Textarea,
}

/// One field of a schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input: InputKind,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            placeholder,
            input: InputKind::Text,
            rules: Vec::new(),
        }
    }

    fn input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    fn required(mut self, message: &'static str) -> Self {
        self.rules.push(FieldRule::Required { message });
        self
    }

    fn email(mut self, message: &'static str) -> Self {
        self.rules.push(FieldRule::Email { message });
        self
    }

    /// Message for a rule kind, if this field carries that rule.
    pub fn message_for(&self, kind: ValidationKind) -> Option<&'static str> {
        self.rules.iter().find_map(|rule| match (rule, kind) {
            (FieldRule::Required { message }, ValidationKind::Required)
            | (FieldRule::Email { message }, ValidationKind::InvalidEmail) => Some(*message),
            _ => None,
        })
    }

    /// First failing rule for `value`.
    pub fn validate(&self, value: &str) -> Option<FieldError> {
        self.rules.iter().find_map(|rule| {
            rule.check(value).map(|(kind, message)| FieldError {
                field: self.name.to_string(),
                kind,
                message: message.to_string(),
            })
        })
    }
}

/// Failure kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    /// Required field left empty
    Required,
    /// Value is not an email address
    InvalidEmail,
}

/// A validation message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: ValidationKind,
    pub message: String,
}

/// Errors of a whole form, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }

    fn set(&mut self, field: &str, error: Option<FieldError>) {
        match error {
            Some(error) => {
                self.0.insert(field.to_string(), error);
            }
            None => {
                self.0.remove(field);
            }
        }
    }
}

/// Fields and rules of one form.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: FormKind,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Contact page form.
    pub fn contact() -> Self {
        Self {
            kind: FormKind::Contact,
            fields: vec![
                FieldSpec::new("name", "Name", "Your name").required("Name is required"),
                FieldSpec::new("email", "Email", "Your email")
                    .input(InputKind::Email)
                    .required("Email is required")
                    .email("Invalid email"),
                FieldSpec::new("subject", "Subject", "Message subject")
                    .required("Subject is required"),
                FieldSpec::new("message", "Message", "Your message")
                    .input(InputKind::Textarea)
                    .required("Message is required"),
            ],
        }
    }

    /// Newsletter sign-up (home hero and footer).
    pub fn newsletter() -> Self {
        Self {
            kind: FormKind::Newsletter,
            fields: vec![FieldSpec::new("email", "Email", "Enter your email")
                .input(InputKind::Email)
                .required("Email is required")
                .email("Invalid email")],
        }
    }

    /// Schema for a form kind.
    pub fn for_kind(kind: FormKind) -> Self {
        match kind {
            FormKind::Contact => Self::contact(),
            FormKind::Newsletter => Self::newsletter(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate one field. Unknown fields never fail.
    pub fn validate_field(&self, name: &str, value: &str) -> Option<FieldError> {
        self.field(name)?.validate(value)
    }

    /// Validate every field; a missing value counts as empty.
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in &self.fields {
            let value = values.get(field.name).map(String::as_str).unwrap_or("");
            errors.set(field.name, field.validate(value));
        }
        errors
    }
}

/// Why a submit did not go through.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Handler(#[from] SubmitError),
}

/// Render-ready view of one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input: InputKind,
    pub value: String,
    pub required: bool,
    pub required_message: Option<&'static str>,
    pub email_message: Option<&'static str>,
    /// Error text, only once the field is touched
    pub error: Option<String>,
}

/// Values, touched set and errors of one form fill-in.
#[derive(Debug, Clone)]
pub struct Form {
    schema: Schema,
    values: FormValues,
    touched: BTreeSet<String>,
    errors: FieldErrors,
}

impl Form {
    /// Empty form: every field starts as `""`.
    pub fn new(schema: Schema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.name.to_string(), String::new()))
            .collect();
        Self {
            schema,
            values,
            touched: BTreeSet::new(),
            errors: FieldErrors::default(),
        }
    }

    /// Form pre-filled from submitted values. Keys outside the schema are dropped.
    pub fn with_values(schema: Schema, submitted: FormValues) -> Self {
        let mut form = Self::new(schema);
        for (name, value) in submitted {
            form.set_value(&name, value);
        }
        form
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Input change. Touched fields are revalidated immediately.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        let Some(field) = self.schema.field(name) else {
            return;
        };
        let name = field.name;
        let value = value.into();
        if self.touched.contains(name) {
            self.errors.set(name, self.schema.validate_field(name, &value));
        }
        self.values.insert(name.to_string(), value);
    }

    /// Field lost focus: mark it touched and validate it.
    pub fn blur(&mut self, name: &str) -> Option<&FieldError> {
        let field = self.schema.field(name)?;
        let name = field.name;
        self.touched.insert(name.to_string());
        let error = field.validate(self.value(name));
        self.errors.set(name, error);
        self.errors.get(name)
    }

    /// Error shown to the user for `name`: only once the field was touched.
    pub fn visible_error(&self, name: &str) -> Option<&FieldError> {
        if !self.is_touched(name) {
            return None;
        }
        self.errors.get(name)
    }

    /// Touch and validate every field, then hand the values to `handler`.
    ///
    /// The handler is not called when any field fails.
    pub fn submit<H>(&mut self, handler: &H) -> Result<Submission, FormError>
    where
        H: SubmitHandler + ?Sized,
    {
        for field in &self.schema.fields {
            self.touched.insert(field.name.to_string());
        }
        self.errors = self.schema.validate(&self.values);
        if !self.errors.is_empty() {
            tracing::debug!(
                form = self.schema.kind.as_str(),
                errors = self.errors.len(),
                "Form submission blocked"
            );
            return Err(FormError::Invalid(self.errors.clone()));
        }

        let submission = Submission {
            kind: self.schema.kind,
            values: self.values.clone(),
        };
        handler.submit(&submission)?;
        Ok(submission)
    }

    /// Per-field views in schema order.
    pub fn field_views(&self) -> Vec<FieldView> {
        self.schema
            .fields
            .iter()
            .map(|f| FieldView {
                name: f.name,
                label: f.label,
                placeholder: f.placeholder,
                input: f.input,
                value: self.value(f.name).to_string(),
                required: f.message_for(ValidationKind::Required).is_some(),
                required_message: f.message_for(ValidationKind::Required),
                email_message: f.message_for(ValidationKind::InvalidEmail),
                error: self.visible_error(f.name).map(|e| e.message.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::tests::RecordingHandler;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn email_fields_share_rule_order() {
        let contact = Schema::contact();
        let newsletter = Schema::newsletter();
        let expected = vec![
            FieldRule::Required {
                message: "Email is required",
            },
            FieldRule::Email {
                message: "Invalid email",
            },
        ];

        assert_eq!(contact.field("email").unwrap().rules, expected);
        assert_eq!(newsletter.field("email").unwrap().rules, expected);
    }

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(is_valid_email("user@localhost"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@-b.com"));
    }

    #[test]
    fn empty_name_is_the_only_error() {
        let errors = Schema::contact().validate(&values(&[
            ("name", ""),
            ("email", "a@b.com"),
            ("subject", "x"),
            ("message", "y"),
        ]));

        assert_eq!(errors.len(), 1);
        let error = errors.get("name").unwrap();
        assert_eq!(error.kind, ValidationKind::Required);
        assert_eq!(error.message, "Name is required");
    }

    #[test]
    fn malformed_email_is_the_only_error() {
        let errors = Schema::contact().validate(&values(&[
            ("name", "A"),
            ("email", "not-an-email"),
            ("subject", "x"),
            ("message", "y"),
        ]));

        assert_eq!(errors.len(), 1);
        let error = errors.get("email").unwrap();
        assert_eq!(error.kind, ValidationKind::InvalidEmail);
        assert_eq!(error.message, "Invalid email");
    }

    #[test]
    fn empty_email_reports_required_only() {
        for schema in [Schema::contact(), Schema::newsletter()] {
            let error = schema.validate_field("email", "").unwrap();
            assert_eq!(error.kind, ValidationKind::Required);
            assert_eq!(error.message, "Email is required");
        }
    }

    #[test]
    fn missing_keys_count_as_empty() {
        let errors = Schema::contact().validate(&FormValues::new());
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn valid_submit_calls_handler_once_with_values() {
        let handler = RecordingHandler::default();
        let input = values(&[
            ("name", "A"),
            ("email", "a@b.com"),
            ("subject", "x"),
            ("message", "y"),
        ]);
        let mut form = Form::with_values(Schema::contact(), input.clone());

        let submission = form.submit(&handler).unwrap();

        assert!(form.errors().is_empty());
        assert_eq!(submission.values, input);
        let received = handler.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].kind, FormKind::Contact);
        assert_eq!(received[0].values, input);
    }

    #[test]
    fn invalid_submit_blocks_handler() {
        let handler = RecordingHandler::default();
        let mut form = Form::with_values(
            Schema::contact(),
            values(&[
                ("name", ""),
                ("email", "a@b.com"),
                ("subject", "x"),
                ("message", "y"),
            ]),
        );

        let err = form.submit(&handler).unwrap_err();

        match err {
            FormError::Invalid(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(handler.received().is_empty());
        assert!(form.visible_error("name").is_some());
    }

    #[test]
    fn resubmit_after_correction_succeeds() {
        let handler = RecordingHandler::default();
        let mut form = Form::new(Schema::newsletter());
        assert!(form.submit(&handler).is_err());

        form.set_value("email", "a@b.com");
        assert!(form.visible_error("email").is_none());
        assert!(form.submit(&handler).is_ok());
        assert_eq!(handler.received().len(), 1);
    }

    #[test]
    fn errors_hidden_until_blur() {
        let mut form = Form::new(Schema::contact());
        form.set_value("email", "nope");
        assert!(form.visible_error("email").is_none());

        let error = form.blur("email").cloned().unwrap();
        assert_eq!(error.kind, ValidationKind::InvalidEmail);
        assert_eq!(form.visible_error("email"), Some(&error));
        assert!(form.visible_error("name").is_none());
    }

    #[test]
    fn drops_values_outside_schema() {
        let form = Form::with_values(
            Schema::newsletter(),
            values(&[("email", "a@b.com"), ("website", "spam")]),
        );
        assert_eq!(form.values(), &values(&[("email", "a@b.com")]));
    }

    #[test]
    fn field_views_follow_schema_order() {
        let mut form = Form::new(Schema::contact());
        form.blur("subject");

        let views = form.field_views();
        let names: Vec<_> = views.iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["name", "email", "subject", "message"]);
        assert_eq!(views[1].input, InputKind::Email);
        assert_eq!(views[1].email_message, Some("Invalid email"));
        assert_eq!(views[2].error.as_deref(), Some("Subject is required"));
        assert_eq!(views[3].input, InputKind::Textarea);
        assert!(views[0].error.is_none());
    }
}
