use std::process::Command;

fn main() {
    // Only rebuild CSS when template or CSS files change
    println!("cargo:rerun-if-changed=assets/css/input.css");
    println!("cargo:rerun-if-changed=templates/");

    // Try to run Tailwind CSS standalone CLI
    let status = Command::new("tailwindcss")
        .args([
            "-i",
            "assets/css/input.css",
            "-o",
            "assets/css/output.css",
            "--minify",
        ])
        .status();

    match status {
        Ok(s) if s.success() => {
            println!("cargo:warning=Tailwind CSS compiled successfully");
        }
        _ => {
            // Tailwind CLI not available — create a minimal fallback CSS
            println!("cargo:warning=Tailwind CLI not found, using fallback CSS");
            let fallback = r#"*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, sans-serif; line-height: 1.6; color: #1c1917; background: #fafaf9; -webkit-font-smoothing: antialiased; }
main { max-width: 42rem; margin: 0 auto; padding: 2rem 1rem; }
nav { display: flex; gap: 1rem; align-items: center; max-width: 42rem; margin: 0 auto; padding: 0.75rem 1rem; border-bottom: 1px solid #e7e5e4; }
nav .spacer { margin-left: auto; }
h1 { font-size: 1.5rem; margin-bottom: 1rem; }
h2 { font-size: 1.125rem; margin-bottom: 0.5rem; }
a { color: inherit; text-decoration: none; }
a:hover { opacity: 0.8; }
form { margin-bottom: 1rem; }
label { display: block; font-size: 0.875rem; margin-bottom: 0.25rem; color: #57534e; }
input, textarea { width: 100%; padding: 0.5rem 0.75rem; margin-bottom: 0.75rem; border: 1px solid #d6d3d1; border-radius: 0.5rem; font: inherit; }
.btn { display: inline-flex; align-items: center; padding: 0.5rem 1rem; border: none; border-radius: 0.5rem; font-size: 0.875rem; font-weight: 500; background: #1c1917; color: #fff; cursor: pointer; }
.btn:hover { background: #44403c; }
.btn-link { background: none; color: #57534e; padding: 0; text-decoration: underline; }
.card { background: #fff; border: 1px solid #e7e5e4; border-radius: 0.75rem; padding: 1.5rem; margin-bottom: 1rem; box-shadow: 0 1px 2px 0 rgb(0 0 0 / 0.05); }
.flash { background: #fef3c7; border: 1px solid #fcd34d; border-radius: 0.5rem; padding: 0.5rem 0.75rem; margin-bottom: 1rem; font-size: 0.875rem; }
.meta { font-size: 0.75rem; color: #78716c; }
.body-text { white-space: pre-wrap; margin: 0.5rem 0; }
"#;
            std::fs::create_dir_all("assets/css").ok();
            std::fs::write("assets/css/output.css", fallback).ok();
        }
    }
}
