//! Field validation for the add-todo form.
//!
//! # Design
//! Each field owns a `FieldState` and an ordered list of `Rule`s. Every
//! mutation re-runs the rules synchronously and stores the failing rule ids
//! in rule order, so the first failure is also the message to display.
//! Validation results are plain state, never errors.

use std::fmt;
use std::sync::Arc;

use crate::types::NewTodo;

pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const MIN_LEN: usize = 2;
pub const MAX_LEN: usize = 50;
pub const DEFAULT_RESERVED: &[&str] = &["abc123", "123abc"];

/// Raw value held by a form widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Text(String),
    Flag(bool),
}

impl Input {
    pub fn text(value: &str) -> Self {
        Input::Text(value.to_string())
    }

    fn is_blank(&self) -> bool {
        match self {
            Input::Empty => true,
            Input::Text(s) => s.is_empty(),
            Input::Flag(_) => false,
        }
    }

    // Length rules only look at non-empty text.
    fn text_len(&self) -> Option<usize> {
        match self {
            Input::Text(s) if !s.is_empty() => Some(s.chars().count()),
            _ => None,
        }
    }
}

/// Identifies which rule a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleId {
    Required,
    MinLength,
    MaxLength,
    Taken,
    Boolean,
    Text,
}

/// Predicate reporting whether a value is reserved ("already exists").
pub type ReservedValues = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Case-insensitive membership in `values`.
pub fn reserved_list(values: &[&str]) -> ReservedValues {
    let values: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
    Arc::new(move |candidate: &str| {
        let candidate = candidate.to_lowercase();
        values.iter().any(|v| *v == candidate)
    })
}

#[derive(Clone)]
pub enum Check {
    Required,
    MinLength(usize),
    MaxLength(usize),
    NotReserved(ReservedValues),
    Boolean,
    Text,
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Required => write!(f, "Required"),
            Check::MinLength(n) => write!(f, "MinLength({n})"),
            Check::MaxLength(n) => write!(f, "MaxLength({n})"),
            Check::NotReserved(_) => write!(f, "NotReserved"),
            Check::Boolean => write!(f, "Boolean"),
            Check::Text => write!(f, "Text"),
        }
    }
}

impl Check {
    fn id(&self) -> RuleId {
        match self {
            Check::Required => RuleId::Required,
            Check::MinLength(_) => RuleId::MinLength,
            Check::MaxLength(_) => RuleId::MaxLength,
            Check::NotReserved(_) => RuleId::Taken,
            Check::Boolean => RuleId::Boolean,
            Check::Text => RuleId::Text,
        }
    }

    fn passes(&self, value: &Input) -> bool {
        match self {
            Check::Required => !value.is_blank(),
            Check::MinLength(min) => value.text_len().is_none_or(|len| len >= *min),
            Check::MaxLength(max) => value.text_len().is_none_or(|len| len <= *max),
            Check::NotReserved(reserved) => match value {
                Input::Text(s) => !(**reserved)(s.as_str()),
                _ => true,
            },
            Check::Boolean => matches!(value, Input::Flag(_) | Input::Empty),
            Check::Text => !matches!(value, Input::Flag(_)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message: String,
}

impl Rule {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    pub fn id(&self) -> RuleId {
        self.check.id()
    }
}

/// Display state of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Pristine,
    DirtyValid,
    DirtyInvalid,
}

#[derive(Debug, Clone)]
pub struct FieldState {
    pub value: Input,
    pub dirty: bool,
    pub touched: bool,
    pub errors: Vec<RuleId>,
    rules: Vec<Rule>,
}

impl FieldState {
    pub fn new(initial: Input, rules: Vec<Rule>) -> Self {
        let mut field = Self {
            value: initial,
            dirty: false,
            touched: false,
            errors: Vec::new(),
            rules,
        };
        field.revalidate();
        field
    }

    /// User typed or picked a value.
    pub fn input(&mut self, value: Input) {
        self.value = value;
        self.dirty = true;
        self.revalidate();
    }

    /// Focus left the widget.
    pub fn blur(&mut self) {
        self.touched = true;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self
            .rules
            .iter()
            .filter(|rule| !rule.check.passes(&self.value))
            .map(Rule::id)
            .collect();
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn status(&self) -> FieldStatus {
        match (self.dirty, self.is_valid()) {
            (false, _) => FieldStatus::Pristine,
            (true, true) => FieldStatus::DirtyValid,
            (true, false) => FieldStatus::DirtyInvalid,
        }
    }

    /// Invalid fields show an error only once the user has interacted with
    /// them, so a fresh form does not light up red.
    pub fn shows_error(&self) -> bool {
        !self.is_valid() && (self.dirty || self.touched)
    }

    pub fn has_error(&self, rule: RuleId) -> bool {
        self.errors.contains(&rule)
    }

    /// Message configured for `rule`, or `"Unknown error"` when this field
    /// has no such rule.
    pub fn message_for(&self, rule: RuleId) -> &str {
        self.rules
            .iter()
            .find(|r| r.id() == rule)
            .map_or(UNKNOWN_ERROR, |r| r.message.as_str())
    }

    /// Message for the first failing rule, in rule order.
    pub fn error_message(&self) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| self.has_error(rule.id()))
            .map(|rule| rule.message.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Owner,
    Category,
    Body,
    Status,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Owner, Field::Category, Field::Body, Field::Status];
}

/// Required text, 2..=50 characters, not reserved.
pub fn text_rules(label: &str, reserved: &ReservedValues) -> Vec<Rule> {
    vec![
        Rule::new(Check::Required, format!("{label} is required")),
        Rule::new(Check::Text, format!("{label} must be text")),
        Rule::new(
            Check::MinLength(MIN_LEN),
            format!("{label} must be at least {MIN_LEN} characters long"),
        ),
        Rule::new(
            Check::MaxLength(MAX_LEN),
            format!("{label} cannot be more than {MAX_LEN} characters long"),
        ),
        Rule::new(
            Check::NotReserved(reserved.clone()),
            format!("{label} has already been taken"),
        ),
    ]
}

pub fn status_rules() -> Vec<Rule> {
    vec![
        Rule::new(Check::Required, "Status is required"),
        Rule::new(Check::Boolean, "Status must be true or false"),
    ]
}

/// The add-todo form: four fields whose conjunction decides whether the
/// create action is enabled.
#[derive(Debug, Clone)]
pub struct TodoForm {
    owner: FieldState,
    category: FieldState,
    body: FieldState,
    status: FieldState,
}

impl TodoForm {
    pub fn new() -> Self {
        Self::with_reserved(reserved_list(DEFAULT_RESERVED))
    }

    pub fn with_reserved(reserved: ReservedValues) -> Self {
        Self {
            owner: FieldState::new(Input::Empty, text_rules("Owner", &reserved)),
            category: FieldState::new(Input::Empty, text_rules("Category", &reserved)),
            body: FieldState::new(Input::Empty, text_rules("Body", &reserved)),
            status: FieldState::new(Input::Flag(false), status_rules()),
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Owner => &self.owner,
            Field::Category => &self.category,
            Field::Body => &self.body,
            Field::Status => &self.status,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Owner => &mut self.owner,
            Field::Category => &mut self.category,
            Field::Body => &mut self.body,
            Field::Status => &mut self.status,
        }
    }

    pub fn set(&mut self, field: Field, value: Input) {
        self.field_mut(field).input(value);
    }

    pub fn blur(&mut self, field: Field) {
        self.field_mut(field).blur();
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).is_valid())
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid()
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.field(field).shows_error()
    }

    pub fn error_message(&self, field: Field) -> Option<&str> {
        self.field(field).error_message()
    }

    pub fn message_for(&self, field: Field, rule: RuleId) -> &str {
        self.field(field).message_for(rule)
    }

    /// Current values as a draft record, or `None` while any field is
    /// invalid.
    pub fn draft(&self) -> Option<NewTodo> {
        if !self.is_valid() {
            return None;
        }
        Some(NewTodo {
            owner: text_value(&self.owner.value),
            category: text_value(&self.category.value),
            body: text_value(&self.body.value),
            status: matches!(self.status.value, Input::Flag(true)),
        })
    }
}

impl Default for TodoForm {
    fn default() -> Self {
        Self::new()
    }
}

fn text_value(value: &Input) -> String {
    match value {
        Input::Text(s) => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TodoForm {
        let mut form = TodoForm::new();
        form.set(Field::Owner, Input::text("Blanche"));
        form.set(Field::Category, Input::text("groceries"));
        form.set(Field::Body, Input::text("buy frozen pizzas"));
        form.set(Field::Status, Input::Flag(true));
        form
    }

    #[test]
    fn new_form_is_invalid_but_shows_no_errors() {
        let form = TodoForm::new();
        assert!(!form.can_submit());
        for field in Field::ALL {
            assert!(!form.has_error(field));
            assert_eq!(form.field(field).status(), FieldStatus::Pristine);
        }
    }

    #[test]
    fn blur_reveals_required_error() {
        let mut form = TodoForm::new();
        form.blur(Field::Owner);
        assert!(form.has_error(Field::Owner));
        assert_eq!(form.error_message(Field::Owner), Some("Owner is required"));
    }

    #[test]
    fn required_messages_use_capitalized_labels() {
        let mut form = TodoForm::new();
        for field in Field::ALL {
            form.blur(field);
        }
        assert_eq!(form.error_message(Field::Category), Some("Category is required"));
        assert_eq!(form.error_message(Field::Body), Some("Body is required"));
        assert_eq!(form.error_message(Field::Status), Some("Status is required"));
    }

    #[test]
    fn typing_reveals_error_without_blur() {
        let mut form = TodoForm::new();
        form.set(Field::Owner, Input::text("x"));
        assert!(!form.field(Field::Owner).touched);
        assert!(form.has_error(Field::Owner));
        assert_eq!(
            form.error_message(Field::Owner),
            Some("Owner must be at least 2 characters long")
        );
    }

    #[test]
    fn blurring_a_valid_field_shows_nothing() {
        let mut form = TodoForm::new();
        form.set(Field::Owner, Input::text("Blanche"));
        form.blur(Field::Owner);
        assert!(form.field(Field::Owner).touched);
        assert!(!form.has_error(Field::Owner));
        assert_eq!(form.error_message(Field::Owner), None);
    }

    #[test]
    fn text_fields_reject_flags() {
        let mut form = filled();
        form.set(Field::Owner, Input::Flag(true));
        assert!(form.field(Field::Owner).has_error(RuleId::Text));
        assert_eq!(form.error_message(Field::Owner), Some("Owner must be text"));
        assert!(!form.can_submit());
        assert!(form.draft().is_none());
    }

    #[test]
    fn filled_form_is_valid() {
        let form = filled();
        assert!(form.can_submit());
        assert_eq!(form.field(Field::Owner).status(), FieldStatus::DirtyValid);
        assert_eq!(
            form.draft(),
            Some(NewTodo {
                owner: "Blanche".to_string(),
                category: "groceries".to_string(),
                body: "buy frozen pizzas".to_string(),
                status: true,
            })
        );
    }

    #[test]
    fn owner_too_short() {
        let mut form = filled();
        form.set(Field::Owner, Input::text("x"));
        assert_eq!(form.field(Field::Owner).status(), FieldStatus::DirtyInvalid);
        assert_eq!(
            form.error_message(Field::Owner),
            Some("Owner must be at least 2 characters long")
        );
        assert!(form.draft().is_none());
    }

    #[test]
    fn owner_too_long() {
        let mut form = filled();
        form.set(Field::Owner, Input::text(&"x".repeat(MAX_LEN + 1)));
        assert!(form.field(Field::Owner).has_error(RuleId::MaxLength));
        form.set(Field::Owner, Input::text(&"x".repeat(MAX_LEN)));
        assert!(form.field(Field::Owner).is_valid());
    }

    #[test]
    fn reserved_values_are_taken_case_insensitively() {
        let mut form = filled();
        for value in ["abc123", "123abc", "ABC123"] {
            form.set(Field::Owner, Input::text(value));
            assert!(!form.can_submit());
            assert_eq!(
                form.error_message(Field::Owner),
                Some("Owner has already been taken")
            );
        }
        form.set(Field::Owner, Input::text("Blanche"));
        assert!(form.field(Field::Owner).is_valid());
    }

    #[test]
    fn custom_reserved_predicate() {
        let mut form = TodoForm::with_reserved(Arc::new(|v: &str| v.starts_with("admin")));
        form.set(Field::Body, Input::text("admin stuff"));
        assert!(form.field(Field::Body).has_error(RuleId::Taken));
        form.set(Field::Body, Input::text("abc123"));
        assert!(form.field(Field::Body).is_valid());
    }

    #[test]
    fn fields_validate_independently() {
        let mut form = filled();
        form.set(Field::Category, Input::text("abc123"));
        assert!(form.field(Field::Owner).is_valid());
        assert_eq!(
            form.error_message(Field::Category),
            Some("Category has already been taken")
        );
    }

    #[test]
    fn status_rejects_string_look_alikes() {
        let mut form = filled();
        form.set(Field::Status, Input::text("true"));
        assert_eq!(
            form.error_message(Field::Status),
            Some("Status must be true or false")
        );
        form.set(Field::Status, Input::Empty);
        assert_eq!(form.error_message(Field::Status), Some("Status is required"));
        form.set(Field::Status, Input::Flag(false));
        assert!(form.can_submit());
    }

    #[test]
    fn first_failing_rule_wins() {
        let mut field = FieldState::new(
            Input::Empty,
            vec![
                Rule::new(Check::MaxLength(3), "too long"),
                Rule::new(Check::NotReserved(reserved_list(&["abcdef"])), "taken"),
            ],
        );
        field.input(Input::text("abcdef"));
        assert_eq!(field.errors, vec![RuleId::MaxLength, RuleId::Taken]);
        assert_eq!(field.error_message(), Some("too long"));
    }

    #[test]
    fn unknown_rule_falls_back() {
        let form = TodoForm::new();
        assert_eq!(form.message_for(Field::Status, RuleId::MinLength), UNKNOWN_ERROR);
        assert_eq!(form.message_for(Field::Owner, RuleId::Boolean), "Unknown error");
        assert_eq!(form.message_for(Field::Owner, RuleId::Required), "Owner is required");
    }
}
