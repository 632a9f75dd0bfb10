// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_document(sections: usize) -> String {
    let mut out = String::new();
    for i in 0..sections {
        out.push_str(&format!("# Section {i}\n\nParagraph number {i} with **bold** and *emphasis*.\n\n"));
        out.push_str("- Bullet\n  - Nested\n- Another\n\n");
        out.push_str("```rust\nfn example() -> i32 {\n    42\n}\n```\n\n");
    }
    out
}

#[allow(dead_code)]
pub fn generate_chunks(document: &str, chunk_size: usize) -> Vec<&str> {
    let bytes = document.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let end = (start + chunk_size).min(bytes.len());
        chunks.push(&document[start..end]);
        start = end;
    }
    chunks
}
