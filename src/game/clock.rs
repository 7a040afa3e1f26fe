/// Formats elapsed seconds as `MM:SS`. Minutes keep counting past 99.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
