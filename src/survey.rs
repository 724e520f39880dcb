use crate::models::{OptionView, SurveyOption, SurveyResponse};
use std::collections::HashSet;

pub const PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
];

/// Colors are positional: they follow the option's current index, not its id.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn default_options() -> Vec<SurveyOption> {
    ["Fish", "Pizza", "Cheeseburgers", "Tacos"]
        .into_iter()
        .zip(1u64..)
        .map(|(name, id)| SurveyOption::new(id, name))
        .collect()
}

/// True when `options` is non-empty and every id is distinct.
pub fn is_valid_list(options: &[SurveyOption]) -> bool {
    let mut seen = HashSet::with_capacity(options.len());
    !options.is_empty() && options.iter().all(|option| seen.insert(option.id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Increment(u64),
    Decrement(u64),
    Add(String),
    Remove(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    options: Vec<SurveyOption>,
}

impl Default for Survey {
    fn default() -> Self {
        Self::new(default_options())
    }
}

impl Survey {
    pub fn new(options: Vec<SurveyOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[SurveyOption] {
        &self.options
    }

    pub fn snapshot(&self) -> Vec<SurveyOption> {
        self.options.clone()
    }

    pub fn total_votes(&self) -> u64 {
        self.options
            .iter()
            .fold(0u64, |sum, option| sum.saturating_add(option.count))
    }

    /// Applies one mutation and reports whether the list changed.
    pub fn apply(&mut self, mutation: &Mutation) -> bool {
        match mutation {
            Mutation::Increment(id) => self.increment(*id),
            Mutation::Decrement(id) => self.decrement(*id),
            Mutation::Add(name) => self.add_option(name).is_some(),
            Mutation::Remove(id) => self.remove_option(*id),
        }
    }

    pub fn increment(&mut self, id: u64) -> bool {
        match self.find_mut(id) {
            Some(option) => {
                option.count = option.count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn decrement(&mut self, id: u64) -> bool {
        match self.find_mut(id) {
            Some(option) if option.count > 0 => {
                option.count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Appends a new option and returns its id, or `None` for a blank name or
    /// when the id space is exhausted.
    pub fn add_option(&mut self, name: &str) -> Option<u64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = self
            .options
            .iter()
            .map(|option| option.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)?;
        self.options.push(SurveyOption::new(id, name));
        Some(id)
    }

    /// Removal is refused while only one option remains.
    pub fn remove_option(&mut self, id: u64) -> bool {
        if self.options.len() <= 1 {
            return false;
        }

        let before = self.options.len();
        self.options.retain(|option| option.id != id);
        self.options.len() != before
    }

    pub fn to_response(&self) -> SurveyResponse {
        SurveyResponse {
            options: self
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| OptionView {
                    id: option.id,
                    name: option.name.clone(),
                    count: option.count,
                    color: color_for(index).to_string(),
                })
                .collect(),
            total_votes: self.total_votes(),
        }
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut SurveyOption> {
        self.options.iter_mut().find(|option| option.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(survey: &Survey, id: u64) -> u64 {
        survey
            .options()
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.count)
            .expect("missing option")
    }

    fn assert_invariants(survey: &Survey) {
        assert!(is_valid_list(survey.options()), "list must be non-empty with distinct ids");
    }

    #[test]
    fn votes_accumulate_into_total() {
        let mut survey = Survey::default();
        for _ in 0..3 {
            assert!(survey.increment(1));
        }
        assert!(survey.increment(2));

        assert_eq!(survey.total_votes(), 4);
        assert_eq!(count_of(&survey, 1), 3);
        assert_eq!(count_of(&survey, 2), 1);
        assert_eq!(count_of(&survey, 3), 0);
    }

    #[test]
    fn add_option_appends_with_next_id() {
        let mut survey = Survey::default();
        assert_eq!(survey.add_option("Sushi"), Some(5));

        let last = survey.options().last().expect("empty survey");
        assert_eq!(last, &SurveyOption::new(5, "Sushi"));
        let names: Vec<_> = survey.options().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Fish", "Pizza", "Cheeseburgers", "Tacos", "Sushi"]);
        assert_invariants(&survey);
    }

    #[test]
    fn add_option_trims_name() {
        let mut survey = Survey::default();
        survey.add_option("  Ramen \n");
        assert_eq!(survey.options().last().unwrap().name, "Ramen");
    }

    #[test]
    fn add_option_ids_skip_past_gaps() {
        let mut survey = Survey::new(vec![SurveyOption::new(2, "A"), SurveyOption::new(9, "B")]);
        assert_eq!(survey.add_option("C"), Some(10));
        assert!(survey.remove_option(10));
        assert_eq!(survey.add_option("D"), Some(10));
        assert_invariants(&survey);
    }

    #[test]
    fn add_option_refused_when_ids_exhausted() {
        let mut survey = Survey::new(vec![SurveyOption::new(u64::MAX, "Max")]);
        let before = survey.clone();
        assert_eq!(survey.add_option("Next"), None);
        assert!(!survey.apply(&Mutation::Add("Next".into())));
        assert_eq!(survey, before);
    }

    #[test]
    fn total_votes_saturates() {
        let mut survey = Survey::default();
        survey.options[0].count = u64::MAX;
        survey.increment(2);
        assert_eq!(survey.total_votes(), u64::MAX);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut survey = Survey::default();
        let before = survey.clone();
        assert_eq!(survey.add_option("   "), None);
        assert_eq!(survey.add_option(""), None);
        assert_eq!(survey, before);
    }

    #[test]
    fn last_option_cannot_be_removed() {
        let mut survey = Survey::default();
        for id in [1, 2, 3] {
            assert!(survey.remove_option(id));
        }
        assert_eq!(survey.options().len(), 1);

        assert!(!survey.remove_option(4));
        assert_eq!(survey.options().len(), 1);
        assert_eq!(survey.options()[0].id, 4);
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut survey = Survey::default();
        let before = survey.clone();
        assert!(!survey.decrement(1));
        assert_eq!(survey, before);

        survey.increment(1);
        assert!(survey.decrement(1));
        assert!(!survey.decrement(1));
        assert_eq!(count_of(&survey, 1), 0);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut survey = Survey::default();
        let before = survey.clone();
        assert!(!survey.increment(42));
        assert!(!survey.decrement(42));
        assert!(!survey.remove_option(42));
        assert_eq!(survey, before);
    }

    #[test]
    fn increment_saturates() {
        let mut survey = Survey::new(vec![SurveyOption {
            id: 1,
            name: "Max".into(),
            count: u64::MAX,
        }]);
        survey.increment(1);
        assert_eq!(count_of(&survey, 1), u64::MAX);
    }

    #[test]
    fn apply_dispatches_mutations() {
        let mut survey = Survey::default();
        let mutations = [
            Mutation::Add("Sushi".into()),
            Mutation::Increment(5),
            Mutation::Increment(5),
            Mutation::Decrement(5),
            Mutation::Remove(1),
            Mutation::Add(" ".into()),
        ];
        let changed: Vec<_> = mutations.iter().map(|m| survey.apply(m)).collect();

        assert_eq!(changed, [true, true, true, true, true, false]);
        assert_eq!(count_of(&survey, 5), 1);
        assert_eq!(survey.options().len(), 4);
        assert_invariants(&survey);
    }

    #[test]
    fn colors_follow_position() {
        let mut survey = Survey::default();
        assert_eq!(survey.to_response().options[2].color, PALETTE[2]);

        survey.remove_option(1);
        let response = survey.to_response();
        assert_eq!(response.options[0].name, "Pizza");
        assert_eq!(response.options[0].color, PALETTE[0]);
        assert_eq!(response.options[1].color, PALETTE[1]);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(color_for(0), color_for(8));
        assert_eq!(color_for(3), color_for(11));
        assert_ne!(color_for(0), color_for(1));
    }

    #[test]
    fn list_validity() {
        assert!(is_valid_list(&default_options()));
        assert!(!is_valid_list(&[]));
        assert!(!is_valid_list(&[SurveyOption::new(1, "A"), SurveyOption::new(1, "B")]));
    }
}
