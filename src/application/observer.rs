use super::view::WorkflowView;

/// Receives the workflow state after every dispatched action.
///
/// The presentation layer implements this to re-render; nothing in the core
/// relies on observers being present.
pub trait WorkflowObserver {
    fn on_update(&self, view: &WorkflowView);
}

pub type WorkflowObserverBox = Box<dyn WorkflowObserver>;
