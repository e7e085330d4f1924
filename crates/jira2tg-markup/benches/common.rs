// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_issue_description(size: usize) -> String {
    let base = "h2. Steps to reproduce\n\
* Open the *settings* page\n\
* Click _Save_ twice\n\
*# See [the runbook|https://wiki.example.com/ops(run)book]\n\
\n\
{quote}It used to work in -1.2- +1.3+ ??for sure??.{quote}\n\
Stack trace: {{NullPointerException}} at {color:red}line 42{color}.\n\
{code:java}\nif (a < b) { throw new IllegalStateException(\"`boom`\"); }\n{code}\n\
{noformat}\nraw *log* output\n{noformat}\n\
Attached !screenshot.png|thumbnail! for [~reporter].\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_plain_text(size: usize) -> String {
    "Plain prose with punctuation: a.b (c) d-e, f! ".repeat(size)
}
