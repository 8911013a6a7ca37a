use crate::core::{
    config::Config,
    state::{Phase, State, Status},
};

pub struct RenderedInfo {
    pub pretty: String,
    pub tooltip: String,
    pub text: String,
    pub alt: &'static str,
}

pub fn render_info(cfg: &Config, state: &State) -> RenderedInfo {
    let mut pretty = String::new();

    pretty.push_str("◆ STATUS\n");
    pretty.push_str(&render_status(cfg, state));
    pretty.push('\n');
    pretty.push_str("◆ CONFIGURATION\n");
    pretty.push_str(&render_config(cfg));

    RenderedInfo {
        pretty: pretty.trim_end().to_string(),
        tooltip: render_tooltip_compact(cfg, state).trim_end().to_string(),
        text: bar_text(cfg, state),
        alt: alt_for(state),
    }
}

/// Bar class/alt: what the user is doing right now.
fn alt_for(state: &State) -> &'static str {
    match state.status() {
        Status::Ready => "ready",
        Status::Paused => "paused",
        Status::Done => "done",
        Status::Running => state.phase().as_str(),
    }
}

fn bar_text(cfg: &Config, state: &State) -> String {
    match state.status() {
        Status::Ready => format!("Ready {}", format_clock(cfg.total_workout_seconds())),
        Status::Done => "Done".to_string(),
        Status::Running | Status::Paused => format!(
            "{} {}/{} {}",
            phase_label(state),
            state.current_rep(),
            cfg.repetitions(),
            format_clock(state.time_left())
        ),
    }
}

fn phase_label(state: &State) -> &'static str {
    match state.phase() {
        Phase::Move => "Move",
        Phase::Rest => "Rest",
    }
}

fn render_status(cfg: &Config, state: &State) -> String {
    let mut out = String::new();

    out.push_str(&format!("State: {}\n", state.status()));

    if state.status().in_progress() {
        out.push_str(&format!("Phase: {}\n", state.phase()));
        out.push_str(&format!("Repetition: {}/{}\n", state.current_rep(), cfg.repetitions()));
        out.push_str(&format!("Phase Left: {}\n", format_clock(state.time_left())));
    }

    out.push_str(&format!("Elapsed: {}\n", format_clock(state.time_elapsed())));
    out.push_str(&format!(
        "Remaining: {}\n",
        format_clock(state.remaining_workout_seconds(cfg))
    ));

    out
}

fn render_config(cfg: &Config) -> String {
    let mut out = String::new();
    out.push_str(&format!("Move: {}s\n", cfg.move_seconds()));
    out.push_str(&format!("Rest: {}s\n", cfg.rest_seconds()));
    out.push_str(&format!("Repetitions: {}\n", cfg.repetitions()));
    out.push_str(&format!("Total: {}\n", format_clock(cfg.total_workout_seconds())));
    out
}

fn render_tooltip_compact(cfg: &Config, state: &State) -> String {
    let mut t = String::new();

    if state.status().in_progress() {
        t.push_str(&format!(
            "{} · rep {}/{}\n",
            phase_label(state),
            state.current_rep(),
            cfg.repetitions()
        ));
    } else {
        t.push_str(&format!("State: {}\n", state.status()));
    }

    t.push_str(&format!(
        "Remaining: {}\n",
        format_clock(state.remaining_workout_seconds(cfg))
    ));
    t.push_str(&format!(
        "{}s move / {}s rest × {}",
        cfg.move_seconds(),
        cfg.rest_seconds(),
        cfg.repetitions()
    ));

    t
}

/// `m:ss`, or `h:mm:ss` past an hour.
pub fn format_clock(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
