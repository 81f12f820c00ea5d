use owo_colors::OwoColorize;

/// Wrap a line in green for success output.
pub fn pr_green(text: &str) -> String {
    text.green().to_string()
}

/// Wrap a line in red for failure output.
pub fn pr_red(text: &str) -> String {
    text.red().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn green_wraps_with_ansi_codes() {
        let styled = pr_green("Node web-1 stopped.");
        assert!(styled.starts_with("\u{1b}[32m"));
        assert!(styled.contains("Node web-1 stopped."));
        assert!(styled.ends_with("\u{1b}[39m"));
    }

    #[test]
    fn red_wraps_with_ansi_codes() {
        let styled = pr_red("Something went wrong");
        assert!(styled.starts_with("\u{1b}[31m"));
        assert!(styled.contains("Something went wrong"));
    }
}
