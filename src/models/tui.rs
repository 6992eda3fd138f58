//! UI-local state types shared by the TUI panes and menus

/// Which pane currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    DeviceList,
    LogPane,
}

/// Actions offered for the selected device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    Mirror,
    StopMirror,
    CheckConnection,
    Push,
    Pull,
    Install,
    Launch,
    SendText,
}

impl DeviceAction {
    pub const ALL: [DeviceAction; 8] = [
        DeviceAction::Mirror,
        DeviceAction::StopMirror,
        DeviceAction::CheckConnection,
        DeviceAction::Push,
        DeviceAction::Pull,
        DeviceAction::Install,
        DeviceAction::Launch,
        DeviceAction::SendText,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeviceAction::Mirror => "🖥️  Start mirroring",
            DeviceAction::StopMirror => "🛑 Stop mirroring",
            DeviceAction::CheckConnection => "🔌 Check connection",
            DeviceAction::Push => "📤 Push file",
            DeviceAction::Pull => "📥 Pull file",
            DeviceAction::Install => "📦 Install package",
            DeviceAction::Launch => "🚀 Launch application",
            DeviceAction::SendText => "⌨️  Send text",
        }
    }

    /// Input fields the action needs before it can run; empty = immediate
    pub fn prompt_fields(&self) -> &'static [&'static str] {
        match self {
            DeviceAction::Push => &["Local file", "Remote path"],
            DeviceAction::Pull => &["Remote file", "Local destination"],
            DeviceAction::Install => &["Package file (.apk)"],
            DeviceAction::Launch => &["Component (com.example/.MainActivity)"],
            DeviceAction::SendText => &["Text"],
            _ => &[],
        }
    }
}

/// Modal text-input prompt state for actions that need arguments
#[derive(Debug, Clone)]
pub struct InputPrompt {
    pub action: DeviceAction,
    pub labels: Vec<&'static str>,
    pub values: Vec<String>,
    pub active: usize,
}

impl InputPrompt {
    pub fn new(action: DeviceAction) -> Self {
        let labels = action.prompt_fields().to_vec();
        let values = vec![String::new(); labels.len()];
        Self {
            action,
            labels,
            values,
            active: 0,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(value) = self.values.get_mut(self.active) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.values.get_mut(self.active) {
            value.pop();
        }
    }

    pub fn next_field(&mut self) {
        if !self.values.is_empty() {
            self.active = (self.active + 1) % self.values.len();
        }
    }

    /// All fields filled in
    pub fn is_complete(&self) -> bool {
        !self.values.iter().any(|v| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_editing_targets_active_field() {
        let mut prompt = InputPrompt::new(DeviceAction::Push);
        assert_eq!(prompt.labels.len(), 2);
        prompt.type_char('a');
        prompt.next_field();
        prompt.type_char('b');
        prompt.type_char('c');
        prompt.backspace();
        assert_eq!(prompt.values, vec!["a".to_string(), "b".to_string()]);
        assert!(prompt.is_complete());
    }

    #[test]
    fn blank_fields_are_incomplete() {
        let mut prompt = InputPrompt::new(DeviceAction::SendText);
        assert!(!prompt.is_complete());
        prompt.type_char(' ');
        assert!(!prompt.is_complete());
    }
}
