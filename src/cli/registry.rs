use std::collections::HashMap;

use strsim::levenshtein;

use super::context::{CliContext, CommandResult};

pub type CommandHandler = fn(&mut CliContext, &[&str]) -> CommandResult;

const SUGGESTION_DISTANCE: usize = 3;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// Entries in registration order.
    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    /// Closest registered name within a small edit distance of `input`.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.order
            .iter()
            .map(|name| (levenshtein(name, input), *name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut CliContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("summary", "", "summary", noop));
        registry.register(CommandEntry::new("project", "", "project", noop));
        registry.register(CommandEntry::new("restore", "", "restore", noop));
        registry
    }

    #[test]
    fn suggests_nearest_command() {
        assert_eq!(registry().suggest("sumary"), Some("summary"));
        assert_eq!(registry().suggest("projct"), Some("project"));
    }

    #[test]
    fn distant_input_has_no_suggestion() {
        assert_eq!(registry().suggest("completely-different"), None);
    }

    #[test]
    fn list_keeps_registration_order() {
        let names: Vec<&str> = registry().list().iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["summary", "project", "restore"]);
    }
}
