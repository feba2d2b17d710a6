//! Reading address lists from text.
//!
//! One or more tokens per line, separated by whitespace or commas. Blank
//! lines and `#` comments are skipped.

use std::error::Error;
use std::io::Read;
use std::path::Path;

/// Split input text into raw tokens.
pub fn parse_input_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read tokens from a file.
pub fn read_input_file(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("Input file does not exist: {}", path.display()).into());
    }
    log::info!("Reading addresses from file: {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading input file {}: {e}", path.display()))?;
    Ok(parse_input_text(&text))
}

/// Read tokens from any reader, e.g. stdin.
pub fn read_input<R: Read>(mut reader: R) -> Result<Vec<String>, Box<dyn Error>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_input_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_text() {
        let text = "# office ranges\n10.0.0.0/30, 10.0.0.9\n\n  192.168.1.1 192.168.1.2 # printers\n";
        assert_eq!(
            parse_input_text(text),
            vec!["10.0.0.0/30", "10.0.0.9", "192.168.1.1", "192.168.1.2"]
        );
    }

    #[test]
    fn test_parse_input_text_empty() {
        assert!(parse_input_text("").is_empty());
        assert!(parse_input_text("\n   \n# only comments\n").is_empty());
    }

    #[test]
    fn test_read_input() {
        let tokens = read_input("10.0.0.1\r\n10.0.0.2\r\n".as_bytes()).unwrap();
        assert_eq!(tokens, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_read_input_file_missing() {
        let err = read_input_file(Path::new("no/such/input.dat")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
