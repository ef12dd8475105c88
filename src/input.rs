use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;
use tracing::debug;

use crate::card::{Card, Color};
use crate::catalog::is_known_card;
use crate::error::Error;

lazy_static! {
    // Five costs, the bonus color, the point value. Trailing text is ignored.
    static ref CARD_LINE: Regex =
        Regex::new(r"^\s*(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(\S+)(?:\s+(-?\d+))?")
            .unwrap();
}

// Parses one line like "0 2 0 2 0 green 0".
// Ok(None) means the line is malformed and should be skipped.
// A bad color word after five good costs is an error, and so is a number
// that parses but can't belong to any card.
pub fn parse_line(line: &str) -> Result<Option<Card>, Error> {
    let caps = match CARD_LINE.captures(line) {
        Some(caps) => caps,
        None => return Ok(None),
    };

    let mut raw = [0i32; 6];
    for (i, n) in raw.iter_mut().take(5).enumerate() {
        *n = match caps[i + 1].parse() {
            Ok(n) => n,
            Err(_) => return Ok(None),
        };
    }
    let color = Color::from_name(&caps[6])?;
    raw[5] = match caps.get(7).map(|m| m.as_str().parse()) {
        Some(Ok(v)) => v,
        _ => return Ok(None),
    };

    let mut fields = [0u8; 6];
    for (field, &n) in fields.iter_mut().zip(raw.iter()) {
        *field = u8::try_from(n).map_err(|_| Error::UnknownCardLine(line.trim().to_string()))?;
    }
    let mut cost = [0u8; 5];
    cost.copy_from_slice(&fields[..5]);
    Ok(Some(Card::new(cost, color, fields[5])))
}

// Reads cards until the end of the stream, skipping malformed lines.
// Every card must exist in the game.
pub fn read_cards(mut reader: impl BufRead) -> Result<Vec<Card>, Error> {
    let mut cards = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Bytes that aren't text just make the line fail to parse
        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line)? {
            Some(card) if is_known_card(&card) => cards.push(card),
            Some(card) => return Err(Error::UnknownCard(card)),
            None => debug!("skipping line {:?}", line),
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_card() {
        assert_eq!(
            parse_line("0 2 0 2 0 green 0").unwrap(),
            Some(Card::new([0, 2, 0, 2, 0], Color::Green, 0))
        );
        assert_eq!(
            parse_line("  6 0 6 8 6   red 10 extra").unwrap(),
            Some(Card::new([6, 0, 6, 8, 6], Color::Red, 10))
        );
    }

    #[test]
    fn skips_malformed() {
        assert_matches!(parse_line(""), Ok(None));
        assert_matches!(parse_line("# comment"), Ok(None));
        assert_matches!(parse_line("0 2 0 2 green 0"), Ok(None));
        assert_matches!(parse_line("0 2 0 2 0 green"), Ok(None));
        assert_matches!(parse_line("0 2 0 2 0 green x"), Ok(None));
        // Too big for a 32 bit integer
        assert_matches!(parse_line("0 99999999999 0 2 0 green 0"), Ok(None));
    }

    #[test]
    fn bad_color_is_fatal() {
        assert_matches!(
            parse_line("0 2 0 2 0 purple 0"),
            Err(Error::UnknownColor(c)) if c == "purple"
        );
        assert_matches!(parse_line("0 2 0 2 0 7 0"), Err(Error::UnknownColor(_)));
    }

    #[test]
    fn out_of_range_numbers_are_fatal() {
        assert_matches!(
            parse_line("0 0 0 0 400 red 0"),
            Err(Error::UnknownCardLine(l)) if l == "0 0 0 0 400 red 0"
        );
        assert_matches!(
            parse_line("0 2 0 2 0 green -1"),
            Err(Error::UnknownCardLine(_))
        );
        assert_matches!(
            parse_line("-1 2 0 2 0 green 0"),
            Err(Error::UnknownCardLine(_))
        );
        let text = "0 2 0 2 0 green 0\n0 0 0 0 400 red 0\n";
        assert_matches!(read_cards(text.as_bytes()), Err(Error::UnknownCardLine(_)));
    }

    #[test]
    fn skips_lines_that_are_not_text() {
        let bytes: &[u8] = b"\xff\xfe junk\n0 2 0 2 0 green 0\n";
        let cards = read_cards(bytes).unwrap();
        assert_eq!(cards, vec![Card::new([0, 2, 0, 2, 0], Color::Green, 0)]);
    }

    #[test]
    fn reads_until_end() {
        let text = "0 2 0 2 0 green 0\nnot a card\n\n0 6 0 0 0 red 3\n6 8 6 6 0 white 10";
        let cards = read_cards(text.as_bytes()).unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1], Card::new([0, 6, 0, 0, 0], Color::Red, 3));
    }

    #[test]
    fn unknown_card_is_fatal() {
        let text = "0 2 0 2 0 green 0\n1 1 1 1 1 red 4\n0 6 0 0 0 red 3\n";
        assert_matches!(
            read_cards(text.as_bytes()),
            Err(Error::UnknownCard(card)) if card.value() == 4
        );
    }
}
