//! Locale-independent, shortest-round-trip number formatting.
//!
//! Grounded on `DevExzh-litchi`'s `src/images/svg_utils.rs::write_num`:
//! same integer fast-path and `ryu` fallback with trailing-zero trimming.
//! Unlike that helper this keeps full round-trip precision rather than
//! rounding to two decimal places — the teacher's own `format_number`
//! (`src/engine/format.rs`) caps at `{:.2}`, which is exactly the
//! precision loss this spec asks to avoid.

pub fn shortest(n: f64) -> String {
    let mut buf = String::new();
    write_shortest(&mut buf, n);
    buf
}

pub fn write_shortest(buf: &mut String, n: f64) {
    if n == 0.0 {
        buf.push('0');
        return;
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        buf.push_str(&(n as i64).to_string());
        return;
    }

    let mut ryu_buf = ryu::Buffer::new();
    let s = ryu_buf.format(n);
    if let Some(stripped) = s.strip_suffix(".0") {
        buf.push_str(stripped);
    } else {
        buf.push_str(s);
    }
}
