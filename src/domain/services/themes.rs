use std::fs::File;
use std::io::BufReader;

use anyhow::bail;
use anyhow::Result;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;

#[derive(Default)]
pub struct Themes {}

impl Themes {
    pub fn list() -> Vec<String> {
        let mut themes = ThemeSet::load_defaults()
            .themes
            .keys()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        themes.sort();

        return themes;
    }

    fn get_from_defaults(theme_name: &str) -> Result<Theme> {
        let mut themes = ThemeSet::load_defaults().themes;
        if let Some(theme) = themes.remove(theme_name) {
            return Ok(theme);
        }

        bail!(format!("Theme {theme_name} does not exist"));
    }

    fn get_from_file(theme_file: &str) -> Result<Theme> {
        let file = File::open(theme_file)?;
        let mut reader = BufReader::new(file);
        let theme = ThemeSet::load_from_reader(&mut reader)?;

        return Ok(theme);
    }

    pub fn get(theme_name: &str, theme_file: &str) -> Result<Theme> {
        if !theme_file.is_empty() {
            return Themes::get_from_file(theme_file);
        }
        return Themes::get_from_defaults(theme_name);
    }
}
