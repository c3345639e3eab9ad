//! The add-product submission flow (post/redirect/get).

use crate::product::ProductId;
use crate::session::Session;
use crate::validation::{ErrorSet, RawProductForm, SubmittedInput, Validator};

/// Flash message left in the session after a product is added.
pub const PRODUCT_ADDED: &str = "Product added successfully!";

/// Form contents and messages for rendering the add-product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub errors: ErrorSet,
    pub submitted: SubmittedInput,
}

impl FormState {
    /// A blank form with no errors.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// What the transport layer should do after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The product was stored; send the browser to `location`.
    Redirect {
        location: String,
        product_id: ProductId,
    },
    /// Validation failed; show the form again.
    Render(FormState),
}

impl Outcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect { .. })
    }
}

/// Validates a submission and, when it passes, adds the product to the
/// session and leaves a flash message.
///
/// Either everything happens (append and flash) or nothing does.
#[derive(Debug, Clone)]
pub struct SubmissionHandler {
    validator: Validator,
    redirect_to: String,
}

impl SubmissionHandler {
    /// Creates a handler that redirects to `redirect_to` on success.
    pub fn new(validator: Validator, redirect_to: impl Into<String>) -> Self {
        Self {
            validator,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    #[tracing::instrument(skip_all)]
    pub fn handle(&self, raw: &RawProductForm, session: &mut Session) -> Outcome {
        let submitted = SubmittedInput::from_raw(raw);

        match self.validator.check(&submitted) {
            Ok(new_product) => {
                let product = session.products_mut().append(new_product);
                let product_id = product.id;
                tracing::info!(
                    %product_id,
                    name = %product.name,
                    category = %product.category,
                    "product added"
                );
                session.set_flash(PRODUCT_ADDED);
                metrics::counter!("products_added_total").increment(1);

                Outcome::Redirect {
                    location: self.redirect_to.clone(),
                    product_id,
                }
            }
            Err(errors) => {
                for (field, _) in errors.iter() {
                    metrics::counter!(
                        "product_submissions_rejected_total",
                        "field" => field.as_str()
                    )
                    .increment(1);
                }
                tracing::debug!(error_count = errors.len(), "submission rejected");

                Outcome::Render(FormState { errors, submitted })
            }
        }
    }
}

impl Default for SubmissionHandler {
    fn default() -> Self {
        Self::new(Validator::default(), "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{CategoryPolicy, Field, NAME_REQUIRED};

    fn raw(name: &str, description: &str, price: &str, category: &str) -> RawProductForm {
        RawProductForm {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            price: Some(price.to_string()),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn test_valid_submission_appends_and_redirects() {
        let handler = SubmissionHandler::default();
        let mut session = Session::new();

        let outcome = handler.handle(&raw("Mouse", "Wireless", "19.99", "Electronics"), &mut session);

        assert_eq!(
            outcome,
            Outcome::Redirect {
                location: "/".to_string(),
                product_id: ProductId::new(3),
            }
        );
        assert_eq!(session.products().len(), 3);
        assert_eq!(session.peek_flash(), Some(PRODUCT_ADDED));

        let added = &session.products().products()[2];
        assert_eq!(added.name, "Mouse");
        assert_eq!(added.description, "Wireless");
        assert_eq!(added.price.value(), 19.99);
        assert_eq!(added.category.as_str(), "Electronics");
    }

    #[test]
    fn test_stored_values_are_trimmed() {
        let handler = SubmissionHandler::default();
        let mut session = Session::new();

        handler.handle(&raw("  Mouse ", " Wireless\n", " 19.99 ", " Books "), &mut session);

        let added = &session.products().products()[2];
        assert_eq!(added.name, "Mouse");
        assert_eq!(added.description, "Wireless");
        assert_eq!(added.category.as_str(), "Books");
    }

    #[test]
    fn test_invalid_submission_leaves_session_untouched() {
        let handler = SubmissionHandler::default();
        let mut session = Session::new();
        let before = session.clone();

        let outcome = handler.handle(&raw("", "x", "5", "Books"), &mut session);

        let Outcome::Render(form) = outcome else {
            panic!("expected the form to be shown again");
        };
        assert_eq!(form.errors.len(), 1);
        assert_eq!(form.errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(session, before);
    }

    #[test]
    fn test_invalid_submission_echoes_trimmed_values() {
        let handler = SubmissionHandler::default();
        let mut session = Session::new();

        let outcome = handler.handle(&raw("  Mouse  ", "", " abc ", " Books"), &mut session);

        let Outcome::Render(form) = outcome else {
            panic!("expected the form to be shown again");
        };
        assert_eq!(form.submitted.name, "Mouse");
        assert_eq!(form.submitted.description, "");
        assert_eq!(form.submitted.price, "abc");
        assert_eq!(form.submitted.category, "Books");
    }

    #[test]
    fn test_missing_fields_count_as_empty() {
        let handler = SubmissionHandler::default();
        let mut session = Session::new();

        let outcome = handler.handle(&RawProductForm::default(), &mut session);

        let Outcome::Render(form) = outcome else {
            panic!("expected the form to be shown again");
        };
        assert_eq!(form.errors.len(), 4);
        assert_eq!(form.submitted, SubmittedInput::default());
    }

    #[test]
    fn test_strict_handler_rejects_unlisted_category() {
        let handler = SubmissionHandler::new(Validator::new(CategoryPolicy::Strict), "/");
        let mut session = Session::new();

        let outcome = handler.handle(&raw("Mouse", "Wireless", "5", "Groceries"), &mut session);

        assert!(!outcome.is_redirect());
        assert_eq!(session.products().len(), 2);
    }

    #[test]
    fn test_redirect_target_is_configurable() {
        let handler = SubmissionHandler::new(Validator::default(), "/inventory");
        let mut session = Session::new();

        let outcome = handler.handle(&raw("Mouse", "Wireless", "5", "Books"), &mut session);

        assert!(matches!(outcome, Outcome::Redirect { ref location, .. } if location == "/inventory"));
    }
}
