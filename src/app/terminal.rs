use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Enter raw mode and the alternate screen.
///
/// Details:
/// - Mouse capture drives wheel scrolling and pull-to-refresh
/// - Focus reporting turns terminal focus changes into screen focus events
pub fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(
        std::io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    Ok(())
}

/// Undo [`setup_terminal`].
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        std::io::stdout(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    Ok(())
}
