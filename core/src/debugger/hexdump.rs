/// Classic 16-bytes-per-row hex + ASCII dump, one line per row.
pub(super) fn render_hexdump(data: &[u8]) -> String {
    let mut out = String::new();
    for (row_start, row) in data.chunks(16).enumerate() {
        let addr = row_start * 16;
        let hex: String = row.iter().map(|b| format!("{b:02X} ")).collect();
        let padding = " __".repeat(16 - row.len());
        let ascii: String = row
            .iter()
            .map(|&b| if (b' '..=b'~').contains(&b) { b as char } else { '.' })
            .collect();
        out.push_str(&format!("{addr:04X}    {hex}{padding}    {ascii}\n"));
    }
    out
}
