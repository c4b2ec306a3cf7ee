use std::io::Cursor;
use fletcher_rust::fletcher_common_rs::packet::core::checksum::ChecksumWidth;
use fletcher_rust::fletcher_common_rs::session::receptor_session::{
    ReceptorSession, SessionStats, DATA_PROMPT, GOODBYE, INVALID_CHOICE, INVALID_INPUT, MENU, MESSAGE_DISCARDED,
};

fn run_session(input: &str, width: ChecksumWidth) -> (String, SessionStats) {
    let mut session = ReceptorSession::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), width);
    let stats = session.run().unwrap();
    let output = String::from_utf8(session.into_output()).unwrap();
    (output, stats)
}

#[test]
fn test_exit_immediately() {
    let (output, stats) = run_session("2\n", ChecksumWidth::default());
    assert_eq!(output, format!("{}{}\n", MENU, GOODBYE));
    assert_eq!(stats, SessionStats::default());
}

#[test]
fn test_valid_message_transcript() {
    let (output, stats) = run_session("1\n10100000011000000010\n2\n", ChecksumWidth::default());
    let expected = format!(
        "{menu}{prompt}Computed checksum: 0000011000000010, Original checksum: 0000011000000010\n\
         Message is valid. Original message: 1010\n{menu}{bye}\n",
        menu = MENU,
        prompt = DATA_PROMPT,
        bye = GOODBYE
    );
    assert_eq!(output, expected);
    assert_eq!(stats.valid, 1);
}

#[test]
fn test_corrupted_message_transcript() {
    let (output, stats) = run_session("1\n10100000011000000011\n2\n", ChecksumWidth::default());
    assert!(output.contains("Computed checksum: 0000011000000010, Original checksum: 0000011000000011\n"));
    assert!(output.contains(MESSAGE_DISCARDED));
    assert!(!output.contains("Message is valid"));
    assert_eq!(stats.discarded, 1);
}

#[test]
fn test_invalid_input_reprompts_menu() {
    let (output, stats) = run_session("1\n10201\n2\n", ChecksumWidth::default());
    assert_eq!(output, format!("{m}{p}{e}{m}{b}\n", m = MENU, p = DATA_PROMPT, e = INVALID_INPUT, b = GOODBYE));
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.checked, 0);
}

#[test]
fn test_short_message_discarded_without_compare() {
    let (output, stats) = run_session("1\n01011\n2\n", ChecksumWidth::default());
    assert!(output.contains("Error: Message is shorter than the 16-bit checksum. Message discarded.\n"));
    assert!(!output.contains("Computed checksum"));
    assert_eq!(stats.discarded, 1);
}

#[test]
fn test_invalid_menu_choice() {
    let (output, _) = run_session("7\n2\n", ChecksumWidth::default());
    assert_eq!(output, format!("{m}{i}{m}{b}\n", m = MENU, i = INVALID_CHOICE, b = GOODBYE));
}

#[test]
fn test_end_of_input_ends_session() {
    let (output, _) = run_session("1\n", ChecksumWidth::default());
    assert_eq!(output, format!("{}{}", MENU, DATA_PROMPT));

    let (output, _) = run_session("", ChecksumWidth::default());
    assert_eq!(output, MENU);
}

#[test]
fn test_custom_width_session() {
    // 幅 8: "1010" -> (6 << 4 | 2) & 0xFF = 0x62
    let (output, stats) = run_session("1\n101001100010\n2\n", ChecksumWidth::new(8).unwrap());
    assert!(output.contains("Computed checksum: 01100010, Original checksum: 01100010"));
    assert_eq!(stats.valid, 1);
}
