use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::selection::{ActivityFilter, ChartKind, Selection, SortKey, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Profiles,
    Repositories,
    Analytics,
}

impl View {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "dashboard" => Some(View::Dashboard),
            "profiles" => Some(View::Profiles),
            "repositories" => Some(View::Repositories),
            "analytics" => Some(View::Analytics),
            _ => None,
        }
    }

    pub fn is_lazy(&self) -> bool {
        !matches!(self, View::Dashboard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    SearchSection,
    DashboardContent,
    Profiles,
    Repositories,
    Analytics,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub view: View,
    pub profile_loaded: bool,
    pub constructed: BTreeSet<View>,
    pub selection: Selection,
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(selection: Selection, dark_mode: bool) -> Self {
        Self {
            selection,
            dark_mode,
            ..Self::default()
        }
    }

    pub fn visible_panel(&self) -> Panel {
        match self.view {
            View::Dashboard if self.profile_loaded => Panel::DashboardContent,
            View::Dashboard => Panel::SearchSection,
            View::Profiles => Panel::Profiles,
            View::Repositories => Panel::Repositories,
            View::Analytics => Panel::Analytics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchView(View),
    ProfileLoaded,
    ProfileCleared,
    SetSort(SortKey),
    SetActivityFilter(ActivityFilter),
    SetChartKind(ChartKind),
    SetTimeWindow(TimeWindow),
    SetDarkMode(bool),
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Show(Panel),
    Construct(View),
    RenderProfile,
    RenderLanguageChart,
    RenderActivityChart,
    RenderRepositories,
    RenderTimeline,
    RenderAnalytics,
    PersistPreferences,
}

const CHART_EFFECTS: [Effect; 3] = [
    Effect::RenderLanguageChart,
    Effect::RenderActivityChart,
    Effect::RenderAnalytics,
];

pub fn step(state: &AppState, action: Action) -> (AppState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        Action::SwitchView(view) => {
            next.view = view;
            if view.is_lazy() && next.constructed.insert(view) {
                effects.push(Effect::Construct(view));
            }
            effects.push(Effect::Show(next.visible_panel()));
        }
        Action::ProfileLoaded => {
            next.profile_loaded = true;
            effects.push(Effect::Show(next.visible_panel()));
            effects.extend([
                Effect::RenderProfile,
                Effect::RenderLanguageChart,
                Effect::RenderActivityChart,
                Effect::RenderRepositories,
                Effect::RenderTimeline,
                Effect::RenderAnalytics,
            ]);
        }
        Action::ProfileCleared => {
            next.profile_loaded = false;
            effects.push(Effect::Show(next.visible_panel()));
        }
        Action::SetSort(sort) => {
            next.selection.sort = sort;
            if next.profile_loaded {
                effects.push(Effect::RenderRepositories);
            }
        }
        Action::SetActivityFilter(filter) => {
            next.selection.activity_filter = filter;
            if next.profile_loaded {
                effects.push(Effect::RenderTimeline);
            }
        }
        Action::SetChartKind(kind) => {
            next.selection.chart_kind = kind;
            if next.profile_loaded {
                effects.push(Effect::RenderLanguageChart);
            }
        }
        Action::SetTimeWindow(window) => {
            next.selection.time_window = window;
            if next.profile_loaded {
                effects.push(Effect::RenderActivityChart);
            }
        }
        Action::SetDarkMode(dark) => {
            next.dark_mode = dark;
            theme_effects(&next, &mut effects);
        }
        Action::ToggleTheme => {
            next.dark_mode = !state.dark_mode;
            theme_effects(&next, &mut effects);
        }
    }

    (next, effects)
}

fn theme_effects(state: &AppState, effects: &mut Vec<Effect>) {
    effects.push(Effect::PersistPreferences);
    if state.profile_loaded {
        effects.extend(CHART_EFFECTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dashboard_branches_on_loaded_profile() {
        let state = AppState::default();
        let (state, effects) = step(&state, Action::SwitchView(View::Dashboard));
        assert_eq!(effects, vec![Effect::Show(Panel::SearchSection)]);

        let (state, effects) = step(&state, Action::ProfileLoaded);
        assert_eq!(effects[0], Effect::Show(Panel::DashboardContent));
        assert!(effects.contains(&Effect::RenderRepositories));
        assert_eq!(state.visible_panel(), Panel::DashboardContent);

        let (state, effects) = step(&state, Action::ProfileCleared);
        assert_eq!(effects, vec![Effect::Show(Panel::SearchSection)]);
        assert!(!state.profile_loaded);
    }

    #[test]
    fn test_lazy_views_are_constructed_once() {
        let state = AppState::default();
        let (state, effects) = step(&state, Action::SwitchView(View::Analytics));
        assert_eq!(
            effects,
            vec![Effect::Construct(View::Analytics), Effect::Show(Panel::Analytics)]
        );

        let (state, _) = step(&state, Action::SwitchView(View::Dashboard));
        let (state, effects) = step(&state, Action::SwitchView(View::Analytics));
        assert_eq!(effects, vec![Effect::Show(Panel::Analytics)]);
        assert_eq!(state.constructed.len(), 1);
    }

    #[test]
    fn test_profile_load_in_other_view_keeps_that_view() {
        let (state, _) = step(&AppState::default(), Action::SwitchView(View::Repositories));
        let (state, effects) = step(&state, Action::ProfileLoaded);
        assert_eq!(effects[0], Effect::Show(Panel::Repositories));
        assert_eq!(state.view, View::Repositories);
    }

    #[test]
    fn test_selection_changes_only_render_with_a_profile() {
        let state = AppState::default();
        let (state, effects) = step(&state, Action::SetChartKind(ChartKind::Bar));
        assert!(effects.is_empty());
        assert_eq!(state.selection.chart_kind, ChartKind::Bar);

        let (state, _) = step(&state, Action::ProfileLoaded);
        let (state, effects) = step(&state, Action::SetTimeWindow(TimeWindow::Week));
        assert_eq!(effects, vec![Effect::RenderActivityChart]);
        assert_eq!(state.selection.time_window.days(), 7);

        let (_, effects) = step(&state, Action::SetActivityFilter(ActivityFilter::Pr));
        assert_eq!(effects, vec![Effect::RenderTimeline]);
    }

    #[test]
    fn test_theme_toggle_persists_and_redraws() {
        let (state, effects) = step(&AppState::default(), Action::ToggleTheme);
        assert!(state.dark_mode);
        assert_eq!(effects, vec![Effect::PersistPreferences]);

        let (state, _) = step(&state, Action::ProfileLoaded);
        let (state, effects) = step(&state, Action::ToggleTheme);
        assert!(!state.dark_mode);
        assert_eq!(effects.len(), 4);
    }

    #[test]
    fn test_step_does_not_touch_input_state() {
        let state = AppState::default();
        let before = state.clone();
        let _ = step(&state, Action::SwitchView(View::Profiles));
        assert_eq!(state, before);
    }
}
