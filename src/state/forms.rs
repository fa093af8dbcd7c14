//! Form definitions and view bindings.
//!
//! This module contains the binding layer between terminal input and the
//! form engine, including:
//! - `FieldSpec`/`FormBinding`: ordered field lists with a focus cursor,
//!   mapping typed characters to field edits, focus movement to blurs, and
//!   the submit key to the engine's submission lifecycle
//! - The concrete login, registration, and user record forms with their
//!   validation rules and network-dispatching submit handlers

use crate::app::NetworkEventSender;
use crate::directory::{Address, Company, Geo, User, UserPayload};
use crate::events::network::Event as NetworkEvent;
use crate::form::{
    FieldPath, FieldStatus, Form, FormState, SubmitFn, Submission, ValidationResult, Value,
};
use log::*;
use regex::Regex;

/// Pattern accepted for registration emails.
const REGISTER_EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";

/// Pattern accepted for user record emails.
const USER_EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

/// Describes one editable field of a rendered form.
///
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub label: &'static str,
    pub path: &'static str,
    pub secret: bool,
}

impl FieldSpec {
    /// Return the top-level field that owns this spec's path; error and
    /// touched feedback is keyed by the owner.
    ///
    pub fn owner(&self) -> &'static str {
        self.path.split('.').next().unwrap_or(self.path)
    }
}

/// Binds terminal input to one form engine instance.
///
pub struct FormBinding {
    form: Form,
    fields: Vec<FieldSpec>,
    cursor: usize,
}

impl FormBinding {
    /// Return a new binding focused on the first field.
    ///
    pub fn new(form: Form, fields: Vec<FieldSpec>) -> FormBinding {
        FormBinding {
            form,
            fields,
            cursor: 0,
        }
    }

    /// Return the ordered field specs.
    ///
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Return the index of the focused field.
    ///
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return the focused field spec.
    ///
    pub fn current(&self) -> &FieldSpec {
        &self.fields[self.cursor]
    }

    /// Return the engine's current state snapshot.
    ///
    pub fn state(&self) -> &FormState {
        self.form.state()
    }

    /// Return the text currently held for a field spec.
    ///
    pub fn text(&self, spec: &FieldSpec) -> &str {
        self.form
            .state()
            .text_at(&FieldPath::new(spec.path))
            .unwrap_or("")
    }

    /// Return the derived status of the top-level field owning a spec.
    ///
    pub fn status(&self, spec: &FieldSpec) -> FieldStatus {
        self.form.state().field_status(spec.owner())
    }

    /// Return the recorded error for the top-level field owning a spec.
    ///
    pub fn error(&self, spec: &FieldSpec) -> Option<&str> {
        self.form.state().error(spec.owner())
    }

    /// Append a character to the focused field.
    ///
    pub fn insert_char(&mut self, c: char) {
        let path = FieldPath::new(self.current().path);
        let mut text = self
            .form
            .state()
            .text_at(&path)
            .unwrap_or("")
            .to_owned();
        text.push(c);
        self.form.set_text(&path, text);
    }

    /// Remove the last character of the focused field.
    ///
    pub fn delete_char(&mut self) {
        let path = FieldPath::new(self.current().path);
        let mut text = self
            .form
            .state()
            .text_at(&path)
            .unwrap_or("")
            .to_owned();
        if text.pop().is_some() {
            self.form.set_text(&path, text);
        }
    }

    /// Blur the focused field and move focus to the next one, wrapping.
    ///
    pub fn focus_next(&mut self) {
        self.blur_current();
        self.cursor = (self.cursor + 1) % self.fields.len();
    }

    /// Blur the focused field and move focus to the previous one, wrapping.
    ///
    pub fn focus_prev(&mut self) {
        self.blur_current();
        self.cursor = (self.cursor + self.fields.len() - 1) % self.fields.len();
    }

    /// Mark the focused field's owner touched, revalidating it.
    ///
    pub fn blur_current(&mut self) {
        let owner = self.current().owner();
        self.form.mark_touched(owner);
    }

    /// Request submission through the engine.
    ///
    pub fn submit(&mut self) -> Submission {
        debug!("Submitting form from field '{}'...", self.current().path);
        self.form.submit()
    }

    /// Restore the form to its initial values and refocus the first field.
    ///
    pub fn reset(&mut self) {
        self.form.reset();
        self.cursor = 0;
    }
}

fn field_text(values: &Value, path: &str) -> String {
    values
        .text_at(&FieldPath::new(path))
        .unwrap_or("")
        .to_owned()
}

fn matches_pattern(pattern: &str, text: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            warn!("Failed to compile regex pattern '{}': {}", pattern, e);
            true
        }
    }
}

fn validate_login(values: &Value) -> ValidationResult {
    let mut errors = ValidationResult::new();
    if field_text(values, "username").is_empty() {
        errors.insert("username".into(), "Username is required".into());
    }
    if field_text(values, "password").is_empty() {
        errors.insert("password".into(), "Password is required".into());
    }
    errors
}

fn validate_register(values: &Value) -> ValidationResult {
    let mut errors = ValidationResult::new();

    if field_text(values, "username").is_empty() {
        errors.insert("username".into(), "Username is required".into());
    }

    let email = field_text(values, "email");
    if email.is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !matches_pattern(REGISTER_EMAIL_PATTERN, &email) {
        errors.insert("email".into(), "Email is invalid".into());
    }

    let password = field_text(values, "password");
    if password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    } else if password.chars().count() < 6 {
        errors.insert(
            "password".into(),
            "Password must be at least 6 characters".into(),
        );
    }

    let confirm = field_text(values, "confirm_password");
    if confirm.is_empty() {
        errors.insert(
            "confirm_password".into(),
            "Confirm password is required".into(),
        );
    } else if confirm != password {
        errors.insert("confirm_password".into(), "Passwords do not match".into());
    }

    errors
}

fn validate_user(values: &Value) -> ValidationResult {
    let mut errors = ValidationResult::new();
    if field_text(values, "name").is_empty() {
        errors.insert("name".into(), "Name is required".into());
    }
    if field_text(values, "username").is_empty() {
        errors.insert("username".into(), "Username is required".into());
    }
    let email = field_text(values, "email");
    if email.is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !matches_pattern(USER_EMAIL_PATTERN, &email) {
        errors.insert("email".into(), "Invalid email address".into());
    }
    errors
}

/// Return the login form bound to the network channel.
///
pub fn login_form(net_sender: NetworkEventSender) -> FormBinding {
    let initial = Value::group([
        ("username", Value::text("")),
        ("password", Value::text("")),
    ]);
    let on_submit: SubmitFn = Box::new(move |values| {
        let net_sender = net_sender.clone();
        Box::pin(async move {
            net_sender
                .send(NetworkEvent::LogIn {
                    username: field_text(&values, "username"),
                    password: field_text(&values, "password"),
                })
                .map_err(|e| anyhow::anyhow!("network channel closed: {}", e))
        })
    });
    FormBinding::new(
        Form::new(initial, Some(Box::new(validate_login)), on_submit),
        vec![
            FieldSpec {
                label: "Username",
                path: "username",
                secret: false,
            },
            FieldSpec {
                label: "Password",
                path: "password",
                secret: true,
            },
        ],
    )
}

/// Return the registration form bound to the network channel.
///
pub fn register_form(net_sender: NetworkEventSender) -> FormBinding {
    let initial = Value::group([
        ("username", Value::text("")),
        ("email", Value::text("")),
        ("password", Value::text("")),
        ("confirm_password", Value::text("")),
    ]);
    let on_submit: SubmitFn = Box::new(move |values| {
        let net_sender = net_sender.clone();
        Box::pin(async move {
            net_sender
                .send(NetworkEvent::Register {
                    username: field_text(&values, "username"),
                    email: field_text(&values, "email"),
                    password: field_text(&values, "password"),
                })
                .map_err(|e| anyhow::anyhow!("network channel closed: {}", e))
        })
    });
    FormBinding::new(
        Form::new(initial, Some(Box::new(validate_register)), on_submit),
        vec![
            FieldSpec {
                label: "Username",
                path: "username",
                secret: false,
            },
            FieldSpec {
                label: "Email",
                path: "email",
                secret: false,
            },
            FieldSpec {
                label: "Password",
                path: "password",
                secret: true,
            },
            FieldSpec {
                label: "Confirm Password",
                path: "confirm_password",
                secret: true,
            },
        ],
    )
}

/// Return the value tree for a user record form, prefilled from an existing
/// record when editing.
///
fn user_values(user: Option<&User>) -> Value {
    let text = |s: &str| Value::text(s);
    match user {
        Some(user) => Value::group([
            ("name", text(&user.name)),
            ("username", text(&user.username)),
            ("email", text(&user.email)),
            ("phone", text(&user.phone)),
            ("website", text(&user.website)),
            (
                "address",
                Value::group([
                    ("street", text(&user.address.street)),
                    ("suite", text(&user.address.suite)),
                    ("city", text(&user.address.city)),
                    ("zipcode", text(&user.address.zipcode)),
                    (
                        "geo",
                        Value::group([
                            ("lat", text(&user.address.geo.lat)),
                            ("lng", text(&user.address.geo.lng)),
                        ]),
                    ),
                ]),
            ),
            (
                "company",
                Value::group([
                    ("name", text(&user.company.name)),
                    ("catch_phrase", text(&user.company.catch_phrase)),
                    ("bs", text(&user.company.bs)),
                ]),
            ),
        ]),
        None => Value::group([
            ("name", Value::text("")),
            ("username", Value::text("")),
            ("email", Value::text("")),
            ("phone", Value::text("")),
            ("website", Value::text("")),
            (
                "address",
                Value::group([
                    ("street", Value::text("")),
                    ("suite", Value::text("")),
                    ("city", Value::text("")),
                    ("zipcode", Value::text("")),
                    (
                        "geo",
                        Value::group([("lat", Value::text("")), ("lng", Value::text(""))]),
                    ),
                ]),
            ),
            (
                "company",
                Value::group([
                    ("name", Value::text("")),
                    ("catch_phrase", Value::text("")),
                    ("bs", Value::text("")),
                ]),
            ),
        ]),
    }
}

/// Assemble a user record payload from a form value tree.
///
pub fn user_payload_from_values(values: &Value) -> UserPayload {
    UserPayload {
        name: field_text(values, "name"),
        username: field_text(values, "username"),
        email: field_text(values, "email"),
        phone: field_text(values, "phone"),
        website: field_text(values, "website"),
        address: Address {
            street: field_text(values, "address.street"),
            suite: field_text(values, "address.suite"),
            city: field_text(values, "address.city"),
            zipcode: field_text(values, "address.zipcode"),
            geo: Geo {
                lat: field_text(values, "address.geo.lat"),
                lng: field_text(values, "address.geo.lng"),
            },
        },
        company: Company {
            name: field_text(values, "company.name"),
            catch_phrase: field_text(values, "company.catch_phrase"),
            bs: field_text(values, "company.bs"),
        },
    }
}

/// Return the user record form bound to the network channel. With an
/// existing record the submit dispatches an update, otherwise a create.
///
pub fn user_form(net_sender: NetworkEventSender, existing: Option<&User>) -> FormBinding {
    let initial = user_values(existing);
    let existing_id = existing.map(|user| user.id);
    let on_submit: SubmitFn = Box::new(move |values| {
        let net_sender = net_sender.clone();
        Box::pin(async move {
            let user = user_payload_from_values(&values);
            let event = match existing_id {
                Some(id) => NetworkEvent::UpdateUser { id, user },
                None => NetworkEvent::CreateUser { user },
            };
            net_sender
                .send(event)
                .map_err(|e| anyhow::anyhow!("network channel closed: {}", e))
        })
    });
    FormBinding::new(
        Form::new(initial, Some(Box::new(validate_user)), on_submit),
        vec![
            FieldSpec {
                label: "Name",
                path: "name",
                secret: false,
            },
            FieldSpec {
                label: "Username",
                path: "username",
                secret: false,
            },
            FieldSpec {
                label: "Email",
                path: "email",
                secret: false,
            },
            FieldSpec {
                label: "Phone",
                path: "phone",
                secret: false,
            },
            FieldSpec {
                label: "Website",
                path: "website",
                secret: false,
            },
            FieldSpec {
                label: "Street",
                path: "address.street",
                secret: false,
            },
            FieldSpec {
                label: "Suite",
                path: "address.suite",
                secret: false,
            },
            FieldSpec {
                label: "City",
                path: "address.city",
                secret: false,
            },
            FieldSpec {
                label: "Zipcode",
                path: "address.zipcode",
                secret: false,
            },
            FieldSpec {
                label: "Latitude",
                path: "address.geo.lat",
                secret: false,
            },
            FieldSpec {
                label: "Longitude",
                path: "address.geo.lng",
                secret: false,
            },
            FieldSpec {
                label: "Company Name",
                path: "company.name",
                secret: false,
            },
            FieldSpec {
                label: "Catch Phrase",
                path: "company.catch_phrase",
                secret: false,
            },
            FieldSpec {
                label: "Business",
                path: "company.bs",
                secret: false,
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use std::sync::mpsc;

    fn channel() -> (NetworkEventSender, mpsc::Receiver<NetworkEvent>) {
        mpsc::channel()
    }

    #[test]
    fn test_validate_login_requires_both_fields() {
        let values = Value::group([
            ("username", Value::text("")),
            ("password", Value::text("")),
        ]);
        let errors = validate_login(&values);
        assert_eq!(errors.get("username").unwrap(), "Username is required");
        assert_eq!(errors.get("password").unwrap(), "Password is required");
    }

    #[test]
    fn test_validate_register_rules() {
        let values = Value::group([
            ("username", Value::text("grace")),
            ("email", Value::text("not-an-email")),
            ("password", Value::text("abc")),
            ("confirm_password", Value::text("xyz")),
        ]);
        let errors = validate_register(&values);
        assert_eq!(errors.get("email").unwrap(), "Email is invalid");
        assert_eq!(
            errors.get("password").unwrap(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            errors.get("confirm_password").unwrap(),
            "Passwords do not match"
        );
        assert!(errors.get("username").is_none());
    }

    #[test]
    fn test_validate_register_accepts_matching_credentials() {
        let values = Value::group([
            ("username", Value::text("grace")),
            ("email", Value::text("grace@example.com")),
            ("password", Value::text("hopper1")),
            ("confirm_password", Value::text("hopper1")),
        ]);
        assert!(validate_register(&values).is_empty());
    }

    fn sample_user() -> User {
        User {
            id: 7,
            name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "1-770-736-8031".to_string(),
            website: "ada.example.com".to_string(),
            address: Address {
                street: "Kulas Light".to_string(),
                suite: "Apt. 556".to_string(),
                city: "Gwenborough".to_string(),
                zipcode: "92998-3874".to_string(),
                geo: Geo {
                    lat: "-37.3159".to_string(),
                    lng: "81.1496".to_string(),
                },
            },
            company: Company {
                name: "Romaguera-Crona".to_string(),
                catch_phrase: "Multi-layered client-server neural-net".to_string(),
                bs: "harness real-time e-markets".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_user_email_format() {
        let values =
            user_values(None).with(&FieldPath::new("email"), Value::text("not-an-email"));
        let errors = validate_user(&values);
        assert_eq!(errors.get("email").unwrap(), "Invalid email address");

        let values = user_values(Some(&sample_user()));
        assert!(validate_user(&values).get("email").is_none());
    }

    #[test]
    fn test_binding_insert_and_delete_edit_focused_field() {
        let (sender, _receiver) = channel();
        let mut binding = login_form(sender);

        let username = binding.fields()[0];
        binding.insert_char('a');
        binding.insert_char('d');
        binding.insert_char('a');
        assert_eq!(binding.text(&username), "ada");

        binding.delete_char();
        assert_eq!(binding.text(&username), "ad");
    }

    #[test]
    fn test_binding_focus_next_blurs_owner() {
        let (sender, _receiver) = channel();
        let mut binding = login_form(sender);

        binding.focus_next();
        assert_eq!(binding.cursor(), 1);
        assert!(binding.state().is_touched("username"));
        assert_eq!(
            binding.state().error("username"),
            Some("Username is required")
        );
        // Password has not been blurred yet.
        assert!(binding.state().error("password").is_none());
    }

    #[test]
    fn test_binding_nested_field_blurs_top_level_owner() {
        let (sender, _receiver) = channel();
        let mut binding = user_form(sender, None);

        let city_index = binding
            .fields()
            .iter()
            .position(|spec| spec.path == "address.city")
            .unwrap();
        while binding.cursor() != city_index {
            binding.focus_next();
        }
        binding.insert_char('L');
        binding.blur_current();
        assert!(binding.state().is_touched("address"));
    }

    #[test]
    fn test_login_submit_rejected_when_empty() {
        let (sender, receiver) = channel();
        let mut binding = login_form(sender);

        assert!(matches!(binding.submit(), Submission::Rejected));
        assert!(receiver.try_recv().is_err());
        assert_eq!(
            binding.state().error("username"),
            Some("Username is required")
        );
        assert!(binding.state().is_touched("password"));
    }

    #[tokio::test]
    async fn test_login_submit_dispatches_network_event() {
        let (sender, receiver) = channel();
        let mut binding = login_form(sender);

        for c in "ada".chars() {
            binding.insert_char(c);
        }
        binding.focus_next();
        for c in "secret".chars() {
            binding.insert_char(c);
        }

        match binding.submit() {
            Submission::Pending(outcome) => outcome.await.unwrap(),
            Submission::Rejected => panic!("valid login form was rejected"),
        }
        match receiver.try_recv().unwrap() {
            NetworkEvent::LogIn { username, password } => {
                assert_eq!(username, "ada");
                assert_eq!(password, "secret");
            }
            event => panic!("unexpected event: {:?}", event),
        }
    }

    #[tokio::test]
    async fn test_user_form_prefilled_update_dispatches_update_event() {
        let (sender, receiver) = channel();
        let user = sample_user();
        let mut binding = user_form(sender, Some(&user));

        match binding.submit() {
            Submission::Pending(outcome) => outcome.await.unwrap(),
            Submission::Rejected => panic!("prefilled user form was rejected"),
        }
        match receiver.try_recv().unwrap() {
            NetworkEvent::UpdateUser { id, user: payload } => {
                assert_eq!(id, user.id);
                assert_eq!(payload.name, user.name);
                assert_eq!(payload.email, user.email);
                assert_eq!(payload.address.city, user.address.city);
            }
            event => panic!("unexpected event: {:?}", event),
        }
    }

    #[tokio::test]
    async fn test_blank_user_form_dispatches_create_event() {
        let (sender, receiver) = channel();
        let mut binding = user_form(sender, None);

        let filled = [
            ("name", "Ada Lovelace"),
            ("username", "ada"),
            ("email", "ada@example.com"),
        ];
        for (path, text) in filled {
            let index = binding
                .fields()
                .iter()
                .position(|spec| spec.path == path)
                .unwrap();
            while binding.cursor() != index {
                binding.focus_next();
            }
            for c in text.chars() {
                binding.insert_char(c);
            }
        }

        match binding.submit() {
            Submission::Pending(outcome) => outcome.await.unwrap(),
            Submission::Rejected => panic!("valid user form was rejected"),
        }
        match receiver.try_recv().unwrap() {
            NetworkEvent::CreateUser { user } => {
                assert_eq!(user.name, "Ada Lovelace");
                assert_eq!(user.username, "ada");
                assert_eq!(user.email, "ada@example.com");
                assert_eq!(user.address.city, "");
            }
            event => panic!("unexpected event: {:?}", event),
        }
    }

    #[test]
    fn test_user_payload_from_values_maps_nested_groups() {
        let user: User = Faker.fake();
        let values = user_values(Some(&user));
        let payload = user_payload_from_values(&values);
        assert_eq!(payload.name, user.name);
        assert_eq!(payload.address.geo.lat, user.address.geo.lat);
        assert_eq!(payload.company.catch_phrase, user.company.catch_phrase);
    }
}
