use byte_parser::{StrParser, ParseIterator};
use memchr::memmem;

/// Counts the non overlapping occurences of `marker` in `s`.
pub fn count_markers(s: &str, marker: &str) -> usize {
	memmem::find_iter(s.as_bytes(), marker).count()
}

// \w
fn is_word(b: &u8) -> bool {
	b.is_ascii_alphanumeric() || *b == b'_'
}

/// Parses `<name>: <n0> <n1> .. <n{count - 1}> <rest>`.
///
/// Every number needs to be separated by whitespace and there needs to
/// be at least one whitespace after the last number, anything after that
/// is ignored. Returns `None` if the line does not have this shape.
pub fn parse_counters<'s>(line: &'s str, count: usize) -> Option<(&'s str, Vec<u64>)> {
	let mut iter = StrParser::new(line);

	iter.consume_while_byte_fn(u8::is_ascii_whitespace);

	let name = iter.record()
		.while_byte_fn(is_word)
		.consume_to_str();
	if name.is_empty() {
		return None
	}

	iter.next_if(|&b| b == b':')?;

	let mut counters = Vec::with_capacity(count);
	for _ in 0..count {
		consume_whitespace(&mut iter)?;
		let num = iter.record()
			.while_byte_fn(u8::is_ascii_digit)
			.consume_to_str();
		counters.push(num.parse().ok()?);
	}

	// the description (or more columns) follow
	consume_whitespace(&mut iter)?;

	Some((name, counters))
}

fn consume_whitespace<'s, I>(iter: &mut I) -> Option<()>
where I: ParseIterator<'s> {
	iter.while_byte_fn(u8::is_ascii_whitespace)
		.consume_at_least(1)
		.ok()
		.map(|_| ())
}
