use crate::analysis::rule::{Signal, StyleRule};
use crate::lexer::TriviaKind;
use crate::parser::ast::SyntaxNode;
use crate::statistics::{TabSpaceData, TabSpaceOccurrence};

// Tabs or spaces at the start of statement and member lines
pub struct IndentStyleRule;

impl StyleRule for IndentStyleRule {
    type Data = TabSpaceData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "indent_style";
    const DESCRIPTION: &'static str = "Indents lines with tabs or with spaces";
    const LABELS: (&'static str, &'static str) = ("tab", "space");
    const INCLUDE_SEVERITY: bool = false;

    fn classify(node: &SyntaxNode) -> Signal<TabSpaceOccurrence> {
        let kind = node.kind();
        if !(kind.is_statement() || kind.is_member()) || node.contains_diagnostics() {
            return Signal::NoSignal;
        }

        let Some(first) = node.first_token() else {
            return Signal::NoSignal;
        };

        // only whitespace that starts the line counts as indentation
        match first.leading.last() {
            Some(trivia)
                if trivia.kind == TriviaKind::Whitespace
                    && trivia.text.chars().count() == first.start.1 =>
            {
                match trivia.text.chars().next() {
                    Some('\t') => Signal::Observation(TabSpaceOccurrence::Tab),
                    Some(' ') => Signal::Observation(TabSpaceOccurrence::Space),
                    _ => Signal::NoSignal,
                }
            }
            _ => Signal::NoSignal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::severity::Severity;
    use crate::analysis::style::Style;
    use crate::parser::{parse_compilation_unit, parse_statement};
    use crate::statistics::Accumulator;

    fn style() -> Style<IndentStyleRule> {
        Style::new(TabSpaceData::default(), Severity::Error)
    }

    #[test]
    fn test_settings() {
        assert_eq!(style().setting(), "");
        let spaces = Style::<IndentStyleRule>::new(TabSpaceData::new(1, 0, 1), Severity::Error);
        assert_eq!(spaces.setting(), "indent_style = space");
        let tabs = Style::<IndentStyleRule>::new(TabSpaceData::new(1, 1, 0), Severity::Error);
        assert_eq!(tabs.setting(), "indent_style = tab");
    }

    #[test]
    fn test_add() {
        let sum = Style::<IndentStyleRule>::new(TabSpaceData::new(1, 2, 3), Severity::Error)
            .add(&Style::new(TabSpaceData::new(10, 20, 30), Severity::Error));
        assert_eq!(sum.data(), TabSpaceData::new(11, 22, 33));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let unit = parse_compilation_unit("class Foo\r{\r\tint x;\r\tint y;\r}\r");
        let data = unit
            .descendant_nodes()
            .into_iter()
            .fold(style(), |style, node| style.update(node))
            .data();
        assert_eq!(data.tab_occurrences(), 2);
        assert_eq!(data.space_occurrences(), 0);
    }

    #[test]
    fn test_update_with_tabs() {
        let data = style().update(&parse_statement("\tvar x = 0;")).data();
        assert_eq!(data, TabSpaceData::new(1, 1, 0));
    }

    #[test]
    fn test_update_with_spaces() {
        let data = style().update(&parse_statement("   var x = 0;")).data();
        assert_eq!(data, TabSpaceData::new(1, 0, 1));
    }

    #[test]
    fn test_update_without_indentation() {
        let data = style().update(&parse_statement("var x = 0;")).data();
        assert_eq!(data.total(), 0);
    }

    #[test]
    fn test_update_with_diagnostics() {
        let data = style().update(&parse_statement("\tvar x = 0")).data();
        assert_eq!(data.total(), 0);
    }

    #[test]
    fn test_whitespace_after_comment_is_not_indentation() {
        let unit = parse_compilation_unit("class A\n{\n/* c */ int x;\n}\n");
        let field = unit.descendant_nodes()[1];
        assert_eq!(IndentStyleRule::classify(field), Signal::NoSignal);
    }
}
