pub mod expression_bodied;
pub mod indent_style;
pub mod new_line_before;
pub mod parenthesis_spacing;
pub mod var_style;

pub use expression_bodied::{ExpressionBodiedConstructorsRule, ExpressionBodiedMethodsRule};
pub use indent_style::IndentStyleRule;
pub use new_line_before::{NewLineBeforeCatchRule, NewLineBeforeElseRule, NewLineBeforeFinallyRule};
pub use parenthesis_spacing::MethodDeclarationParenthesesSpacingRule;
pub use var_style::{VarElsewhereRule, VarForBuiltInTypesRule, VarWhenTypeIsApparentRule};
