//! Ellipsis Example - Clamp a paragraph to a few rows.
//!
//! Shows the three marker positions at the current terminal width, then an
//! expand/collapse round trip and a simulated resize.
//!
//! Run with: cargo run --example ellipsis

use std::io;
use std::rc::Rc;

use crossterm::event::Event;
use spark_ellipsis::{
    detect_cell_metrics, detect_terminal_size, handle_resize, terminal_width, text_ellipsis,
    ContainerStyle, EllipsisHandle, EllipsisProps, Position,
};
use spark_signals::signal;

const CONTENT: &str = "Taffy is a flexible, high-performance, cross-platform UI layout library \
written in Rust. It implements the Flexbox, Grid and Block layout algorithms, and a measure \
function lets it size leaf nodes whose content only the caller can measure.";

fn print_block(title: &str, handle: &EllipsisHandle) {
    println!("{title} (width {}, pass {}):", handle.width(), handle.pass_count());
    for line in handle.render_lines() {
        println!("  │ {line}");
    }
    println!();
}

fn main() -> io::Result<()> {
    detect_terminal_size();
    let line_height = detect_cell_metrics().unwrap_or(spark_ellipsis::layout::DEFAULT_LINE_HEIGHT);

    println!("=== spark-ellipsis Example ===\n");
    println!("Terminal width: {}, cell height: {line_height}px\n", terminal_width());

    // The component follows the detected cell height.
    let style = ContainerStyle {
        padding_right: 4,
        ..ContainerStyle::default()
    };

    let position = signal(Position::End);
    let handle = text_ellipsis(EllipsisProps {
        content: CONTENT.into(),
        rows: 2.into(),
        position: position.clone().into(),
        expand_text: " [more]".to_string(),
        collapse_text: " [less]".to_string(),
        style,
        on_click_action: Some(Rc::new(|expanded| {
            println!("(action clicked, expanded = {expanded})\n");
        })),
        ..Default::default()
    });

    for pos in [Position::End, Position::Start, Position::Middle] {
        position.set(pos);
        print_block(&format!("position = {pos}"), &handle);
    }

    position.set(Position::End);
    handle.click_action();
    print_block("expanded", &handle);
    handle.click_action();
    print_block("collapsed", &handle);

    let narrow = terminal_width().saturating_sub(20).max(24);
    handle_resize(&Event::Resize(narrow, 24));
    print_block("after resize", &handle);

    handle.unmount();
    Ok(())
}
