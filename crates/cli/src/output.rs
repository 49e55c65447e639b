//! Terminal rendering of page outcomes.

use eclat_storefront::pages::{Notice, NoticeKind, PageOutcome, SummaryView};

/// Print a notification.
pub fn notice(notice: &Notice) {
    let tag = match notice.kind {
        NoticeKind::Success => "✓",
        NoticeKind::Info => "i",
        NoticeKind::Error => "✗",
    };
    println!("{tag} {}", notice.message);
}

/// Print an outcome, handing a rendered view to `render`.
pub fn outcome<V>(outcome: PageOutcome<V>, render: impl FnOnce(V)) {
    match outcome {
        PageOutcome::Render(view) => render(view),
        PageOutcome::Redirect { to, notice: note } => {
            if let Some(note) = note {
                notice(&note);
            }
            println!("→ {to}");
        }
        PageOutcome::PromptLogin(note) => {
            notice(&note);
            println!("  Log in with `eclat login`.");
        }
        PageOutcome::Notify(note) => notice(&note),
        PageOutcome::Alert(message) => println!("! {message}"),
    }
}

/// Print an outcome that carries no view.
pub fn action(result: PageOutcome<()>) {
    outcome(result, |()| {});
}

/// Print the order summary rows.
pub fn summary(summary: &SummaryView) {
    println!("  {:<12}{:>12}", "Subtotal", summary.subtotal);
    println!("  {:<12}{:>12}", "Shipping", summary.shipping);
    println!("  {:<12}{:>12}", "Tax (10%)", summary.tax);
    println!("  {:<12}{:>12}", "Total", summary.total);
}
