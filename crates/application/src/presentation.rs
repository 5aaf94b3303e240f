use formwork_core::{AppResult, NonEmptyString};
use formwork_domain::{
    EntryDefinition, EntryType, EntryValue, ExternalContext, FormSchema, GroupDefinition,
    ProblemCode, ProblemMessages, SubmissionResult,
};

use crate::hooks::{InputElementTypeFn, PresentationHooks};

/// Element used to render an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single `<input>` element.
    Input,
    /// Multi-line `<textarea>` element.
    Textarea,
}

impl ControlKind {
    /// Returns the element name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Textarea => "textarea",
        }
    }
}

/// One problem with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemView {
    /// Problem code.
    pub code: ProblemCode,
    /// Resolved message, when the message table has one.
    pub message: Option<String>,
}

/// Render-ready entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// Entry id.
    pub id: String,
    /// Entry title.
    pub title: String,
    /// Entry type.
    pub entry_type: EntryType,
    /// HTML input element type.
    pub input_type: &'static str,
    /// Element used for the entry.
    pub control: ControlKind,
    /// Form field name, `baseId[entryId]`.
    pub input_name: String,
    /// Current value.
    pub value: EntryValue,
    /// Required marker.
    pub required: bool,
    /// Checkbox title when on.
    pub title_when_on: Option<String>,
    /// Checkbox title when off.
    pub title_when_off: Option<String>,
    /// Input step, set for integer entries.
    pub step: Option<u32>,
    /// Problems found this submission.
    pub problems: Vec<ProblemView>,
}

/// Render-ready group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    /// Group id.
    pub id: String,
    /// Whether the group is active.
    pub fulfilled: bool,
    /// Ids the group depends on, used for client-side toggling.
    pub dependent_on: Vec<String>,
    /// Number of dependencies not yet on.
    pub dependencies_remaining_count: usize,
    /// Whether any dependency is still off.
    pub dependencies_unfulfilled: bool,
    /// Entries in group order.
    pub entries: Vec<EntryView>,
}

/// Entries of a form as they are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormLayout {
    /// Visible groups in schema order.
    Groups(Vec<GroupView>),
    /// Every entry in schema order, for forms without structure.
    Entries(Vec<EntryView>),
}

/// Render-ready form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Form base id.
    pub base_id: String,
    /// Whether a payload was processed.
    pub is_being_submitted: bool,
    /// Whether every processed entry passed validation.
    pub entries_are_valid: bool,
    /// Entry layout.
    pub layout: FormLayout,
}

/// Builds the view model of a processed or fresh form.
///
/// Hidden groups are left out. Group fulfillment comes from the result when
/// the form was submitted and is otherwise computed from the entries'
/// current values and the external context.
pub fn present_form(
    result: &SubmissionResult,
    context: &ExternalContext,
    hooks: &PresentationHooks,
) -> AppResult<FormView> {
    let input_element_type = hooks.resolve_input_element_type()?;
    let schema = result.schema();
    let default_messages = ProblemMessages::default();
    let presenter = Presenter {
        result,
        schema,
        context,
        messages: schema.problem_messages().unwrap_or(&default_messages),
        input_element_type,
    };

    let layout = match schema.structure() {
        Some(groups) => FormLayout::Groups(
            groups
                .iter()
                .filter(|group| !group.is_hidden())
                .map(|group| presenter.group_view(group))
                .collect(),
        ),
        None => FormLayout::Entries(
            schema
                .entries()
                .iter()
                .map(|entry| presenter.entry_view(entry))
                .collect(),
        ),
    };

    Ok(FormView {
        base_id: schema.base_id().as_str().to_owned(),
        is_being_submitted: result.is_being_submitted(),
        entries_are_valid: result.entries_are_valid(),
        layout,
    })
}

struct Presenter<'a> {
    result: &'a SubmissionResult,
    schema: &'a FormSchema,
    context: &'a ExternalContext,
    messages: &'a ProblemMessages,
    input_element_type: InputElementTypeFn,
}

impl Presenter<'_> {
    fn group_view(&self, group: &GroupDefinition) -> GroupView {
        let dependencies_remaining_count = group
            .dependent_on_ids()
            .iter()
            .filter(|id| !self.is_on(id))
            .count();

        let fulfilled = self
            .result
            .is_group_fulfilled(group.id().as_str())
            .unwrap_or_else(|| {
                !group.has_dependency()
                    || dependencies_remaining_count == 0
                    || (!group.also_process_if_ids().is_empty()
                        && group.also_process_if_ids().iter().all(|id| self.is_on(id)))
            });

        GroupView {
            id: group.id().as_str().to_owned(),
            fulfilled,
            dependent_on: group
                .dependent_on_ids()
                .iter()
                .map(|id| id.as_str().to_owned())
                .collect(),
            dependencies_remaining_count,
            dependencies_unfulfilled: dependencies_remaining_count > 0,
            entries: group
                .entries()
                .iter()
                .filter_map(|entry_id| self.schema.entry(entry_id.as_str()))
                .map(|entry| self.entry_view(entry))
                .collect(),
        }
    }

    fn entry_view(&self, entry: &EntryDefinition) -> EntryView {
        let entry_type = entry.entry_type();
        let problems = self
            .result
            .problems_for(entry.id().as_str())
            .map(|problems| {
                problems
                    .iter()
                    .map(|code| ProblemView {
                        code,
                        message: self
                            .messages
                            .message_for(entry_type, code)
                            .map(str::to_owned),
                    })
                    .collect()
            })
            .unwrap_or_default();

        EntryView {
            id: entry.id().as_str().to_owned(),
            title: entry.title().as_str().to_owned(),
            entry_type,
            input_type: (self.input_element_type)(entry_type),
            control: if entry.is_multiple_lines() {
                ControlKind::Textarea
            } else {
                ControlKind::Input
            },
            input_name: format!("{}[{}]", self.schema.base_id(), entry.id()),
            value: entry.value().clone(),
            required: entry.is_required(),
            title_when_on: entry.title_when_on().map(str::to_owned),
            title_when_off: entry.title_when_off().map(str::to_owned),
            step: (entry_type == EntryType::Integer).then_some(1),
            problems,
        }
    }

    fn is_on(&self, id: &NonEmptyString) -> bool {
        let entry_on = self
            .schema
            .entry(id.as_str())
            .is_some_and(|entry| !entry.value().is_empty());

        entry_on || self.context.filled(id.as_str()).is_some()
    }
}
