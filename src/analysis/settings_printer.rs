/// Renders setting lines as an `.editorconfig` section.
pub struct SettingsPrinter {
    pub glob: String,
}

impl SettingsPrinter {
    pub fn new(glob: &str) -> Self {
        Self {
            glob: glob.to_string(),
        }
    }

    pub fn sprint(&self, lines: &[String]) -> String {
        let mut section = format!("[{}]\n", self.glob);
        for line in lines.iter().filter(|l| !l.is_empty()) {
            section.push_str(line);
            section.push('\n');
        }
        section
    }

    pub fn print(&self, lines: &[String]) {
        print!("{}", self.sprint(lines))
    }
}
