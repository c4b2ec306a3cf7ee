/// 受信側の対話セッション
/// メニュー表示・入力読み取り・検証結果の表示のみを担い、計算は checksum モジュールに委ねる

use std::io::{BufRead, Write};

use log::{debug, info};

use crate::fletcher_common_rs::packet::core::checksum::{verify, ChecksumWidth};
use crate::fletcher_common_rs::packet::core::exceptions::{ChecksumWidthError, FletcherError, FletcherResult};
use crate::fletcher_common_rs::packet::core::message::Message;

pub const MENU: &str = "\nSelect an operation: \n[1] Perform Fletcher's Checksum.\n[2] Exit Program.\n";
pub const DATA_PROMPT: &str = "Enter the binary data to be transferred:\n";
pub const INVALID_INPUT: &str = "Error: Invalid input. Only binary strings (containing '0' and '1') are allowed.\n";
pub const MESSAGE_DISCARDED: &str = "Error: This message has errors. Message discarded.";
pub const INVALID_CHOICE: &str = "Invalid choice. Please select a valid option from the menu.\n";
pub const GOODBYE: &str = "Exiting program. Goodbye!";

/// メニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PerformChecksum,
    Exit,
    Invalid,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Self {
        match line {
            "1" => MenuChoice::PerformChecksum,
            "2" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// 1回のチェックサム操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// 一致
    Valid,
    /// 不一致（破棄）
    Discarded,
    /// 幅より短い（破棄）
    TooShort,
    /// 不正な記号（再入力）
    Rejected,
}

/// セッション統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub checked: u64,
    pub valid: u64,
    pub discarded: u64,
    pub rejected: u64,
}

pub struct ReceptorSession<R, W> {
    input: R,
    output: W,
    width: ChecksumWidth,
    stats: SessionStats,
}

impl<R: BufRead, W: Write> ReceptorSession<R, W> {
    pub fn new(input: R, output: W, width: ChecksumWidth) -> Self {
        Self {
            input,
            output,
            width,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// メニューループを実行する。終了選択または入力終端で戻る
    pub fn run(&mut self) -> FletcherResult<SessionStats> {
        info!("receptor session started (checksum width {})", self.width);

        loop {
            self.write(MENU)?;
            let Some(line) = self.read_line()? else {
                debug!("input closed, leaving session");
                break;
            };

            match MenuChoice::parse(&line) {
                MenuChoice::PerformChecksum => {
                    self.write(DATA_PROMPT)?;
                    let Some(entry) = self.read_line()? else {
                        break;
                    };
                    self.check_entry(&entry)?;
                }
                MenuChoice::Exit => {
                    writeln!(self.output, "{}", GOODBYE)?;
                    break;
                }
                MenuChoice::Invalid => self.write(INVALID_CHOICE)?,
            }
        }

        self.output.flush()?;
        debug!("receptor session finished: {:?}", self.stats);
        Ok(self.stats)
    }

    /// 1件の入力を検証して結果を表示する
    pub fn check_entry(&mut self, entry: &str) -> FletcherResult<CheckOutcome> {
        let message = match Message::parse(entry, self.width) {
            Ok(message) => message,
            Err(FletcherError::Symbol(e)) => {
                debug!("rejected input: {}", e);
                self.stats.rejected += 1;
                self.write(INVALID_INPUT)?;
                return Ok(CheckOutcome::Rejected);
            }
            Err(FletcherError::Width(ChecksumWidthError::MessageTooShort { width, actual })) => {
                debug!("message of {} bits shorter than {}-bit checksum", actual, width);
                self.stats.checked += 1;
                self.stats.discarded += 1;
                writeln!(
                    self.output,
                    "Error: Message is shorter than the {}-bit checksum. Message discarded.",
                    width
                )?;
                return Ok(CheckOutcome::TooShort);
            }
            Err(e) => return Err(e),
        };

        self.stats.checked += 1;
        let report = verify(&message);

        writeln!(
            self.output,
            "Computed checksum: {}, Original checksum: {}",
            report.computed, report.claimed
        )?;

        if report.valid {
            self.stats.valid += 1;
            writeln!(self.output, "Message is valid. Original message: {}", report.payload)?;
            Ok(CheckOutcome::Valid)
        } else {
            self.stats.discarded += 1;
            writeln!(self.output, "{}", MESSAGE_DISCARDED)?;
            Ok(CheckOutcome::Discarded)
        }
    }

    fn write(&mut self, text: &str) -> FletcherResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> FletcherResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
