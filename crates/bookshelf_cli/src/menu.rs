//! Numbered menu commands for both catalog layouts.

/// Menu entry shared by the layout-specific command enums.
pub trait MenuCommand: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Stable name used in log lines.
    fn name(self) -> &'static str;

    /// One-based menu key of this command.
    fn key(self) -> usize {
        Self::ALL
            .iter()
            .position(|command| *command == self)
            .map_or(0, |index| index + 1)
    }

    /// Parses a menu choice such as `"3"`; surrounding whitespace is ignored.
    fn parse(choice: &str) -> Option<Self> {
        let index = choice.trim().parse::<usize>().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }

    fn menu_lines() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|command| format!("{}. {}", command.key(), command.label()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatCommand {
    Add,
    Search,
    Delete,
    List,
    Exit,
}

impl MenuCommand for FlatCommand {
    const ALL: &'static [Self] = &[
        Self::Add,
        Self::Search,
        Self::Delete,
        Self::List,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Add => "Add a book",
            Self::Search => "Search for a book",
            Self::Delete => "Delete a book",
            Self::List => "List all books",
            Self::Exit => "Exit",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Search => "search",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Exit => "exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreCommand {
    Add,
    Search,
    List,
    ListByGenre,
    Delete,
    Exit,
}

impl MenuCommand for GenreCommand {
    const ALL: &'static [Self] = &[
        Self::Add,
        Self::Search,
        Self::List,
        Self::ListByGenre,
        Self::Delete,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Add => "Add a book",
            Self::Search => "Search books by title or author",
            Self::List => "List all books",
            Self::ListByGenre => "List books by genre",
            Self::Delete => "Delete a book",
            Self::Exit => "Exit",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Search => "search",
            Self::List => "list",
            Self::ListByGenre => "list_by_genre",
            Self::Delete => "delete",
            Self::Exit => "exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlatCommand, GenreCommand, MenuCommand};

    #[test]
    fn flat_menu_maps_one_through_five() {
        assert_eq!(FlatCommand::parse("1"), Some(FlatCommand::Add));
        assert_eq!(FlatCommand::parse(" 3 "), Some(FlatCommand::Delete));
        assert_eq!(FlatCommand::parse("5"), Some(FlatCommand::Exit));
        assert_eq!(FlatCommand::parse("6"), None);
        assert_eq!(FlatCommand::parse("0"), None);
        assert_eq!(FlatCommand::parse("add"), None);
        assert_eq!(FlatCommand::parse(""), None);
    }

    #[test]
    fn genre_menu_maps_one_through_six() {
        assert_eq!(GenreCommand::parse("4"), Some(GenreCommand::ListByGenre));
        assert_eq!(GenreCommand::parse("6"), Some(GenreCommand::Exit));
        assert_eq!(GenreCommand::parse("7"), None);
        assert_eq!(GenreCommand::parse("-1"), None);
    }

    #[test]
    fn menu_lines_are_numbered_in_order() {
        let lines = FlatCommand::menu_lines();
        assert_eq!(lines.first().map(String::as_str), Some("1. Add a book"));
        assert_eq!(lines.last().map(String::as_str), Some("5. Exit"));
        assert_eq!(GenreCommand::ListByGenre.key(), 4);
    }
}
