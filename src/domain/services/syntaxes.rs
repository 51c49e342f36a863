use once_cell::sync::Lazy;
use ratatui::style::Color;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> =
    Lazy::new(|| return SyntaxSet::load_defaults_newlines());

pub struct Syntaxes {}

impl Syntaxes {
    pub fn get(name: &str) -> &'static SyntaxReference {
        if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(name) {
            return syntax;
        }

        return SYNTAX_SET.find_syntax_plain_text();
    }

    pub fn list() -> Vec<String> {
        let mut syntaxes = SYNTAX_SET
            .syntaxes()
            .iter()
            .map(|syntax| return syntax.name.to_string())
            .collect::<Vec<String>>();
        syntaxes.sort();

        return syntaxes;
    }

    pub fn translate_colour(syntect_color: syntect::highlighting::Color) -> Option<Color> {
        match syntect_color {
            syntect::highlighting::Color { r, g, b, a } if a > 0 => {
                return Some(Color::Rgb(r, g, b));
            }
            _ => return None,
        }
    }
}
