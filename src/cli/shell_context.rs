use strsim::levenshtein;

use crate::core::BookManager;
use crate::currency::CurrencyStyle;
use crate::storage::JsonStorage;

use super::output;
use super::registry::CommandRegistry;
use super::{commands, CliError, CommandError, LoopControl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the book context, the currency
/// style, and the registry it was dispatched from.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: BookManager,
    pub style: CurrencyStyle,
    pub running: bool,
    pub last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let storage = JsonStorage::new_default()?;
        let manager = BookManager::open(Box::new(storage));
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Ok(Self {
            mode,
            registry,
            manager,
            style: CurrencyStyle::default(),
            running: true,
            last_command: None,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!(
            "figaro {} {}> ",
            self.manager.selected_year(),
            self.manager.current_month()
        )
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let lowered = input.to_lowercase();
        let suggestion = self
            .registry
            .names()
            .map(|name| (levenshtein(&lowered, name), name))
            .min()
            .filter(|(distance, _)| *distance <= 2)
            .map(|(_, name)| name);
        match suggestion {
            Some(name) => output::warning(format!(
                "Unknown command `{input}`. Did you mean `{name}`?"
            )),
            None => output::warning(format!(
                "Unknown command `{input}`. Type `help` to see available commands."
            )),
        }
    }

    pub(crate) fn report_error(&mut self, err: CommandError) -> Result<(), CliError> {
        output::error(err);
        Ok(())
    }
}
