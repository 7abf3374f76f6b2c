//! SCORM lifecycle sequences issued at the game's terminal events.
//!
//! The game controller never talks to the transport directly; these three
//! sequences are the only places CMI elements are written.

use crate::scorm::{ScormSession, ScormVersion};

use super::score::ScoreBoard;

/// Session start: open the connection and mark the attempt in progress.
/// Returns false when the host refused Initialize (the game then continues
/// in a degraded, non-reporting mode).
pub fn open_session(session: &mut ScormSession) -> bool {
    if !session.initialize() {
        return false;
    }
    session.set_value("cmi.completion_status", "incomplete");
    session.commit();
    true
}

/// Session end: report the final score and close the connection. Completion
/// is "completed" regardless of performance; success requires a flawless run.
/// SCORM 1.2 additionally gets the legacy lesson_status field. Returns the
/// submitted percentage for the status display.
pub fn submit_outcome(session: &mut ScormSession, score: &ScoreBoard) -> u32 {
    let percent = score.percent();
    session.set_value("cmi.score.raw", percent);
    session.set_value("cmi.score.max", 100);
    session.set_value("cmi.score.min", 0);
    session.set_value("cmi.completion_status", "completed");
    let success = if score.flawless() { "passed" } else { "failed" };
    session.set_value("cmi.success_status", success);
    if session.version() == ScormVersion::V12 {
        session.set_value("cmi.core.lesson_status", success);
    }
    session.commit();
    session.terminate();
    percent
}

/// Page unload: best effort only; the browser may discard the page before
/// these calls complete. A session interrupted mid-game is marked suspended
/// so the LMS can offer resume; a finished one just closes.
pub fn suspend_on_unload(session: &mut ScormSession, finished: bool) {
    if !session.is_initialized() {
        return;
    }
    if !finished {
        session.set_value("cmi.exit", "suspend");
        session.commit();
    }
    session.terminate();
}
