//! # Multi-step project creation
//!
//! [`ProjectWizard`] drives the "new project" form through four steps:
//!
//! | Step | Collects | Validator |
//! |------|----------|-----------|
//! | [`WizardStep::Basics`] | title, short description, description | [`validate_project_basics`] |
//! | [`WizardStep::Details`] | status, tags, technologies, repository URL | [`validate_project_details`] |
//! | [`WizardStep::Vacancies`] | zero or more vacancy drafts with questions | [`validate_vacancy_draft`] |
//! | [`WizardStep::Review`] | read-only summary, submit | all of the above |
//!
//! Moving forward validates the current step; moving back never does. Steps can be
//! revisited directly once reached. The draft is turned into API payloads with
//! [`ProjectDraft::to_new_project`] and [`VacancyDraft::to_new_vacancy`].

use serde::{Deserialize, Serialize};

use crate::models::{Id, ProjectStatus, Tag, Technology};
use crate::validation::{
    validate_project_basics, validate_project_details, validate_vacancy_draft, FieldErrors,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Basics,
    Details,
    Vacancies,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Basics,
        WizardStep::Details,
        WizardStep::Vacancies,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Basics => "Basics",
            WizardStep::Details => "Details",
            WizardStep::Vacancies => "Vacancies",
            WizardStep::Review => "Review",
        }
    }

    fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn prev(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Payload for `POST projects`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub status: ProjectStatus,
    pub tag_ids: Vec<Id>,
    pub technology_ids: Vec<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

/// Payload for `POST vacancies`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewVacancy {
    pub project_id: Id,
    pub title: String,
    pub description: String,
    pub technology_ids: Vec<Id>,
    pub questions: Vec<NewQuestion>,
}

/// Question payload, nested in [`NewVacancy`] or posted to `questions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacancy_id: Option<Id>,
    pub text: String,
    pub required: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionDraft {
    pub text: String,
    pub required: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VacancyDraft {
    pub title: String,
    pub description: String,
    pub technologies: Vec<Technology>,
    pub questions: Vec<QuestionDraft>,
}

impl VacancyDraft {
    pub fn to_new_vacancy(&self, project_id: Id) -> NewVacancy {
        NewVacancy {
            project_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            technology_ids: self.technologies.iter().map(|t| t.id).collect(),
            questions: self
                .questions
                .iter()
                .map(|q| NewQuestion {
                    vacancy_id: None,
                    text: q.text.trim().to_string(),
                    required: q.required,
                })
                .collect(),
        }
    }
}

/// Everything the wizard collects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub status: ProjectStatus,
    pub repository_url: String,
    pub tags: Vec<Tag>,
    pub technologies: Vec<Technology>,
    pub vacancies: Vec<VacancyDraft>,
}

impl ProjectDraft {
    pub fn to_new_project(&self) -> NewProject {
        let repository_url = self.repository_url.trim();
        NewProject {
            title: self.title.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            tag_ids: self.tags.iter().map(|t| t.id).collect(),
            technology_ids: self.technologies.iter().map(|t| t.id).collect(),
            repository_url: (!repository_url.is_empty()).then(|| repository_url.to_string()),
        }
    }

    /// Add a tag unless already selected.
    pub fn add_tag(&mut self, tag: Tag) {
        if !self.tags.iter().any(|t| t.id == tag.id) {
            self.tags.push(tag);
        }
    }

    pub fn remove_tag(&mut self, id: Id) {
        self.tags.retain(|t| t.id != id);
    }

    pub fn add_technology(&mut self, technology: Technology) {
        if !self.technologies.iter().any(|t| t.id == technology.id) {
            self.technologies.push(technology);
        }
    }

    pub fn remove_technology(&mut self, id: Id) {
        self.technologies.retain(|t| t.id != id);
    }
}

/// Step state machine around a [`ProjectDraft`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectWizard {
    pub draft: ProjectDraft,
    step: WizardStep,
    furthest: WizardStep,
    errors: FieldErrors,
}

impl Default for ProjectWizard {
    fn default() -> Self {
        Self::new(ProjectDraft::default())
    }
}

impl ProjectWizard {
    pub fn new(draft: ProjectDraft) -> Self {
        Self {
            draft,
            step: WizardStep::Basics,
            furthest: WizardStep::Basics,
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_last(&self) -> bool {
        self.step == WizardStep::Review
    }

    /// Fraction of steps completed, `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.step.index() as f32 / (WizardStep::ALL.len() - 1) as f32
    }

    /// Whether `step` has been reached before and may be jumped to.
    pub fn can_visit(&self, step: WizardStep) -> bool {
        step <= self.furthest
    }

    /// Errors for the current step, without moving.
    pub fn validate_current(&self) -> FieldErrors {
        self.validate_step(self.step)
    }

    fn validate_step(&self, step: WizardStep) -> FieldErrors {
        match step {
            WizardStep::Basics => validate_project_basics(&self.draft),
            WizardStep::Details => validate_project_details(&self.draft),
            WizardStep::Vacancies => {
                let mut errors = FieldErrors::new();
                for (i, vacancy) in self.draft.vacancies.iter().enumerate() {
                    for (field, message) in validate_vacancy_draft(i, vacancy).iter() {
                        errors.add(field, message);
                    }
                }
                errors
            }
            WizardStep::Review => {
                let mut errors = FieldErrors::new();
                for step in [WizardStep::Basics, WizardStep::Details, WizardStep::Vacancies] {
                    for (field, message) in self.validate_step(step).iter() {
                        errors.add(field, message);
                    }
                }
                errors
            }
        }
    }

    /// Validate the current step and advance if it is valid.
    pub fn next(&mut self) -> Result<WizardStep, FieldErrors> {
        let errors = self.validate_current();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }
        self.errors = FieldErrors::new();
        if let Some(next) = self.step.next() {
            self.step = next;
            self.furthest = self.furthest.max(next);
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.errors = FieldErrors::new();
        self.step
    }

    /// Jump to an already-visited step. Returns whether the jump happened.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        if !self.can_visit(step) {
            return false;
        }
        self.step = step;
        self.errors = FieldErrors::new();
        true
    }

    /// Validate everything before submitting from the review step.
    pub fn finish(&mut self) -> Result<NewProject, FieldErrors> {
        let errors = self.validate_step(WizardStep::Review);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }
        Ok(self.draft.to_new_project())
    }

    /// Surface server-side field errors returned on submit.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn add_vacancy(&mut self) -> usize {
        self.draft.vacancies.push(VacancyDraft::default());
        self.draft.vacancies.len() - 1
    }

    pub fn remove_vacancy(&mut self, index: usize) {
        if index < self.draft.vacancies.len() {
            self.draft.vacancies.remove(index);
        }
    }

    pub fn add_question(&mut self, vacancy: usize) {
        if let Some(v) = self.draft.vacancies.get_mut(vacancy) {
            v.questions.push(QuestionDraft::default());
        }
    }

    pub fn remove_question(&mut self, vacancy: usize, question: usize) {
        if let Some(v) = self.draft.vacancies.get_mut(vacancy) {
            if question < v.questions.len() {
                v.questions.remove(question);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_basics(wizard: &mut ProjectWizard) {
        wizard.draft.title = "  Open Telescope ".into();
        wizard.draft.short_description = "DIY radio telescope".into();
        wizard.draft.description = "Long form description".into();
    }

    fn rust() -> Technology {
        Technology {
            id: 1,
            name: "Rust".into(),
            category: Some("language".into()),
        }
    }

    #[test]
    fn test_next_blocks_on_invalid_step() {
        let mut wizard = ProjectWizard::default();
        let errors = wizard.next().unwrap_err();
        assert!(errors.get("title").is_some());
        assert_eq!(wizard.step(), WizardStep::Basics);
        assert_eq!(wizard.errors(), &errors);

        filled_basics(&mut wizard);
        assert_eq!(wizard.next(), Ok(WizardStep::Details));
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_full_walk_and_payload() {
        let mut wizard = ProjectWizard::default();
        filled_basics(&mut wizard);
        wizard.next().unwrap();

        wizard.draft.add_technology(rust());
        wizard.draft.add_technology(rust());
        wizard.draft.add_tag(Tag {
            id: 5,
            name: "science".into(),
        });
        assert_eq!(wizard.draft.technologies.len(), 1);
        wizard.next().unwrap();

        let v = wizard.add_vacancy();
        wizard.add_question(v);
        assert!(wizard.next().is_err());

        wizard.draft.vacancies[v].title = "Firmware engineer".into();
        wizard.draft.vacancies[v].description = "Write the DSP pipeline".into();
        wizard.draft.vacancies[v].questions[0].text = "Have you used SDRs?".into();
        wizard.draft.vacancies[v].questions[0].required = true;
        assert_eq!(wizard.next(), Ok(WizardStep::Review));
        assert!(wizard.is_last());
        assert_eq!(wizard.progress(), 1.0);

        let payload = wizard.finish().unwrap();
        assert_eq!(payload.title, "Open Telescope");
        assert_eq!(payload.technology_ids, vec![1]);
        assert_eq!(payload.tag_ids, vec![5]);
        assert!(payload.repository_url.is_none());

        let vacancy = wizard.draft.vacancies[0].to_new_vacancy(42);
        assert_eq!(vacancy.project_id, 42);
        assert_eq!(vacancy.questions.len(), 1);
        assert!(vacancy.questions[0].required);
    }

    #[test]
    fn test_go_to_only_visited_steps() {
        let mut wizard = ProjectWizard::default();
        assert!(!wizard.go_to(WizardStep::Details));

        filled_basics(&mut wizard);
        wizard.next().unwrap();
        assert_eq!(wizard.back(), WizardStep::Basics);
        assert!(wizard.go_to(WizardStep::Details));
        assert!(!wizard.go_to(WizardStep::Review));
        assert_eq!(wizard.back(), WizardStep::Basics);
        assert_eq!(wizard.back(), WizardStep::Basics);
    }

    #[test]
    fn test_finish_revalidates_earlier_steps() {
        let mut wizard = ProjectWizard::default();
        filled_basics(&mut wizard);
        wizard.next().unwrap();
        wizard.draft.add_technology(rust());
        wizard.next().unwrap();
        wizard.next().unwrap();

        wizard.draft.title.clear();
        let errors = wizard.finish().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
    }

    #[test]
    fn test_remove_vacancy_and_question_bounds() {
        let mut wizard = ProjectWizard::default();
        let v = wizard.add_vacancy();
        wizard.add_question(v);
        wizard.remove_question(v, 5);
        assert_eq!(wizard.draft.vacancies[v].questions.len(), 1);
        wizard.remove_question(v, 0);
        assert!(wizard.draft.vacancies[v].questions.is_empty());
        wizard.remove_vacancy(3);
        wizard.remove_vacancy(v);
        assert!(wizard.draft.vacancies.is_empty());
    }

    #[test]
    fn test_new_project_serializes_without_empty_repository() {
        let draft = ProjectDraft {
            title: "T".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(draft.to_new_project()).unwrap();
        assert!(json.get("repository_url").is_none());
        assert_eq!(json["status"], "active");
    }
}
