use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

use crate::app::{default_debug_address, Action, WalletSource};

const BANNER_WIDTH: usize = 60;

/// Line-oriented prompts over any reader/writer pair
pub struct Prompter<'a, I, O> {
    input: &'a mut I,
    output: &'a mut O,
}

impl<'a, I: BufRead, O: Write> Prompter<'a, I, O> {
    pub fn new(input: &'a mut I, output: &'a mut O) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut O {
        &mut *self.output
    }

    /// Print `prompt` and read one trimmed line. Closed input is an error.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// `y` or `yes` in any case
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(prompt)?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

pub fn print_banner<O: Write>(out: &mut O) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "STX WALLET BALANCE CHECKER")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Choose data source:")?;
    writeln!(out, "1. Excel file (.xlsx/.xls/.ods)")?;
    writeln!(out, "2. Google Sheets (public)")?;
    writeln!(out, "3. CSV file")?;
    writeln!(out, "4. Sample addresses")?;
    writeln!(out, "5. Debug mode (test single address)")
}

/// Ask for a menu choice and whatever that choice needs
pub fn choose_action<I: BufRead, O: Write>(prompter: &mut Prompter<'_, I, O>) -> Result<Action> {
    let choice = prompter.ask("\nEnter your choice (1-5): ")?;

    let action = match choice.as_str() {
        "1" => {
            let path = prompter.ask("Enter Excel file path: ")?;
            let sheet = prompter.ask("Enter sheet name (press Enter for first sheet): ")?;
            Action::Check(WalletSource::Excel {
                path: path.into(),
                sheet: non_empty(sheet),
            })
        }
        "2" => {
            let url = prompter.ask("Enter Google Sheets URL: ")?;
            Action::Check(WalletSource::GoogleSheet { url, sheet: None })
        }
        "3" => {
            let path = prompter.ask("Enter CSV file path: ")?;
            Action::Check(WalletSource::Csv { path: path.into() })
        }
        "4" => Action::Check(WalletSource::Sample),
        "5" => {
            let address = prompter.ask("Enter wallet address to debug: ")?;
            Action::Inspect(non_empty(address).unwrap_or_else(default_debug_address))
        }
        other => bail!("Invalid choice: '{}'", other),
    };

    Ok(action)
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn choose(input: &str) -> (Result<Action>, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let action = choose_action(&mut Prompter::new(&mut input, &mut output));
        (action, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_excel_choice_with_default_sheet() {
        let (action, output) = choose("1\n  wallets.xlsx \n\n");

        assert_eq!(
            action.unwrap(),
            Action::Check(WalletSource::Excel {
                path: PathBuf::from("wallets.xlsx"),
                sheet: None,
            })
        );
        assert!(output.contains("Enter sheet name (press Enter for first sheet): "));
    }

    #[test]
    fn test_debug_choice_defaults_to_sample_address() {
        let (action, _) = choose("5\n\n");
        assert_eq!(
            action.unwrap(),
            Action::Inspect("SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6".to_string())
        );
    }

    #[test]
    fn test_sample_and_csv_choices() {
        assert_eq!(choose("4\n").0.unwrap(), Action::Check(WalletSource::Sample));
        assert_eq!(
            choose("3\nlist.csv\n").0.unwrap(),
            Action::Check(WalletSource::Csv {
                path: PathBuf::from("list.csv")
            })
        );
    }

    #[test]
    fn test_invalid_choice() {
        let err = choose("9\n").0.unwrap_err();
        assert!(err.to_string().contains("Invalid choice"));
    }

    #[test]
    fn test_closed_input() {
        assert!(choose("").0.is_err());
    }

    #[test]
    fn test_confirm() {
        let mut input = Cursor::new(b"YES\nn\ny\n".to_vec());
        let mut output = Vec::new();
        let mut prompter = Prompter::new(&mut input, &mut output);

        assert!(prompter.confirm("? ").unwrap());
        assert!(!prompter.confirm("? ").unwrap());
        assert!(prompter.confirm("? ").unwrap());
    }

    #[test]
    fn test_banner() {
        let mut out = Vec::new();
        print_banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&"=".repeat(60)));
        assert!(text.contains("5. Debug mode (test single address)"));
    }
}
