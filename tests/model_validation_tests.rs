use portfolio_site::models::{
    ContactForm, MIN_MESSAGE_CHARS, MIN_NAME_CHARS, ProjectForm, ValidationError,
};

fn form(name: &str, email: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    }
}

// --- ContactForm::validate ---

#[test]
fn test_contact_boundaries() {
    let ten = "a".repeat(MIN_MESSAGE_CHARS);
    let nine = "a".repeat(MIN_MESSAGE_CHARS - 1);

    assert!(form("Al", "a@b", &ten).validate().is_ok());
    assert_eq!(
        form("A", "a@b", &ten).validate(),
        Err(ValidationError::NameTooShort)
    );
    assert_eq!(
        form("Al", "a@b", &nine).validate(),
        Err(ValidationError::MessageTooShort)
    );
    assert_eq!(MIN_NAME_CHARS, 2);
}

#[test]
fn test_contact_rules_checked_in_order() {
    // Every field is bad; the name is reported first.
    assert_eq!(
        form("", "", "").validate(),
        Err(ValidationError::NameTooShort)
    );
    assert_eq!(
        form("Al", "nope", "").validate(),
        Err(ValidationError::EmailMissingAt)
    );
}

#[test]
fn test_contact_whitespace_does_not_count() {
    assert_eq!(
        form("  A  ", "a@b", "long enough message").validate(),
        Err(ValidationError::NameTooShort)
    );
    assert_eq!(
        form("Alice", "a@b", "   short   \n\t").validate(),
        Err(ValidationError::MessageTooShort)
    );
}

#[test]
fn test_contact_counts_characters_not_bytes() {
    assert!(form("Zoë", "z@b", "ünïcödé ok").validate().is_ok());
    // One character, two bytes.
    assert_eq!(
        form("é", "a@b", "long enough message").validate(),
        Err(ValidationError::NameTooShort)
    );
    // Nine characters, well over ten bytes.
    assert_eq!(
        form("Al", "a@b", "ééééééééé").validate(),
        Err(ValidationError::MessageTooShort)
    );
}

#[test]
fn test_contact_email_only_needs_an_at_sign() {
    let accepted = form("Al", "@", "a long enough message").validate().unwrap();
    assert_eq!(accepted.email, "@");
}

#[test]
fn test_contact_returns_trimmed_fields() {
    let accepted = form(" Bob ", " bob@example.com\n", "\tHello there, Bob here.  ")
        .validate()
        .unwrap();

    assert_eq!(accepted.name, "Bob");
    assert_eq!(accepted.email, "bob@example.com");
    assert_eq!(accepted.message, "Hello there, Bob here.");
}

#[test]
fn test_contact_default_is_invalid() {
    assert_eq!(
        ContactForm::default().validate(),
        Err(ValidationError::NameTooShort)
    );
}

// --- ProjectForm::link ---

#[test]
fn test_project_link_normalisation() {
    let mut project = ProjectForm::default();
    assert_eq!(project.link(), None);

    project.project_link = Some(String::new());
    assert_eq!(project.link(), None);

    project.project_link = Some("   ".into());
    assert_eq!(project.link(), None);

    project.project_link = Some("https://example.com".into());
    assert_eq!(project.link(), Some("https://example.com"));

    // Non-blank links are kept verbatim, surrounding whitespace included.
    project.project_link = Some(" https://example.com ".into());
    assert_eq!(project.link(), Some(" https://example.com "));
}
