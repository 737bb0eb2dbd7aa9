use std::fmt;
use std::sync::Arc;

/// Predicate over the selected ids deciding whether an action is offered.
pub type Eligibility = Arc<dyn Fn(&[String]) -> bool + Send + Sync>;

/// One operation that can be applied to every selected record.
///
/// Built with chained constructors:
///
/// ```
/// use sift::bulk::BulkAction;
///
/// let delete = BulkAction::new("delete", "Delete Clients").destructive();
/// assert!(delete.requires_confirmation);
///
/// let export = BulkAction::new("export", "Export Data");
/// assert!(!export.requires_confirmation);
/// ```
#[derive(Clone)]
pub struct BulkAction {
    pub id: String,
    pub label: String,
    pub is_destructive: bool,
    pub requires_confirmation: bool,
    pub confirmation_message: Option<String>,
    eligibility: Option<Eligibility>,
}

impl BulkAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_destructive: false,
            requires_confirmation: false,
            confirmation_message: None,
            eligibility: None,
        }
    }

    pub fn requiring_confirmation(mut self) -> Self {
        self.requires_confirmation = true;
        self
    }

    pub fn with_confirmation(mut self, message: impl Into<String>) -> Self {
        self.requires_confirmation = true;
        self.confirmation_message = Some(message.into());
        self
    }

    /// Marks the action destructive. Destructive actions always go through
    /// confirmation and need the typed token.
    pub fn destructive(mut self) -> Self {
        self.is_destructive = true;
        self.requires_confirmation = true;
        self
    }

    pub fn eligible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.eligibility = Some(Arc::new(predicate));
        self
    }

    /// Never eligible for an empty selection; otherwise defers to the
    /// predicate, if any.
    pub fn is_eligible(&self, selected: &[String]) -> bool {
        if selected.is_empty() {
            return false;
        }
        self.eligibility.as_ref().map_or(true, |pred| pred(selected))
    }

    /// Text for the confirmation dialog.
    pub fn confirmation_prompt(&self, selected_count: usize) -> String {
        match &self.confirmation_message {
            Some(message) => message.clone(),
            None => format!(
                "Apply {} to {} selected item{}?",
                self.label,
                selected_count,
                if selected_count == 1 { "" } else { "s" }
            ),
        }
    }
}

impl fmt::Debug for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("is_destructive", &self.is_destructive)
            .field("requires_confirmation", &self.requires_confirmation)
            .field("confirmation_message", &self.confirmation_message)
            .field("eligibility", &self.eligibility.is_some())
            .finish()
    }
}

/// The static list of actions a screen offers. Never touches the selection.
#[derive(Debug, Clone, Default)]
pub struct BulkActionCatalog {
    actions: Vec<BulkAction>,
}

impl BulkActionCatalog {
    pub fn new(actions: Vec<BulkAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[BulkAction] {
        &self.actions
    }

    pub fn get(&self, id: &str) -> Option<&BulkAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Actions available for `selected`, in catalog order.
    pub fn eligible_actions(&self, selected: &[String]) -> Vec<&BulkAction> {
        self.actions
            .iter()
            .filter(|a| a.is_eligible(selected))
            .collect()
    }
}
