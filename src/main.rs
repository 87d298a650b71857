use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use indoc::indoc;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::Level;

use term_pip::components::LabelComponent;
use term_pip::constants::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_CONTENT_HEIGHT, DEFAULT_CONTENT_WIDTH,
    DEFAULT_MARGIN, DRAG_THRESHOLD, SNAP_TRANSITION,
};
use term_pip::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_pip::drivers::pointer::PointerMapper;
use term_pip::drivers::{InputDriver, OutputDriver};
use term_pip::event_loop::{ControlFlow, EventLoop, LoopEvent};
use term_pip::geometry::{CellMetrics, Point};
use term_pip::tracing_sub;
use term_pip::ui::UiFrame;
use term_pip::{
    Alignment, Binding, KeyboardEvent, KeyboardNotifier, PipError, PointerEvent, Popover,
    PopoverConfig, Timestamp,
};

const HOST_TEXT: &str = indoc! {"
    term-pip

    Drag the popover with the left mouse button and let go: it settles in
    whichever corner you threw it towards. Clicking outside of it counts as
    an outside tap.

    k  show the on-screen keyboard
    K  hide the on-screen keyboard
    p  show / hide the popover
    q  quit
"};

const KEYBOARD_ROWS: u16 = 6;

#[derive(Parser, Debug)]
#[command(
    name = "term-pip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Picture-in-picture popover demo"
)]
struct Cli {
    /// Drag distance, in logical pixels, needed to snap to the other edge.
    #[arg(long, value_name = "PIXELS", default_value_t = DRAG_THRESHOLD)]
    threshold: f32,

    /// Window in which a second move must follow the first to start a drag.
    #[arg(long = "first-move-ms", value_name = "MILLIS", default_value_t = 300)]
    first_move_ms: u64,

    /// Logical pixels per terminal column.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_CELL_WIDTH)]
    cell_width: f32,

    /// Logical pixels per terminal row.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_CELL_HEIGHT)]
    cell_height: f32,

    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_MARGIN)]
    margin: u16,

    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_CONTENT_WIDTH)]
    width: u16,

    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_CONTENT_HEIGHT)]
    height: u16,

    /// Corner the popover starts in.
    #[arg(long, value_enum, default_value_t = Corner::BottomTrailing)]
    corner: Corner,

    /// Write logs to this file. Logs are discarded otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Include per-event trace logs.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Corner {
    TopLeading,
    TopTrailing,
    BottomLeading,
    BottomTrailing,
}

impl From<Corner> for Alignment {
    fn from(corner: Corner) -> Self {
        match corner {
            Corner::TopLeading => Alignment::TOP_LEADING,
            Corner::TopTrailing => Alignment::TOP_TRAILING,
            Corner::BottomLeading => Alignment::BOTTOM_LEADING,
            Corner::BottomTrailing => Alignment::BOTTOM_TRAILING,
        }
    }
}

impl TryFrom<&Cli> for PopoverConfig {
    type Error = PipError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let config = PopoverConfig {
            drag_threshold: cli.threshold,
            first_move_window: Duration::from_millis(cli.first_move_ms),
            transition: SNAP_TRANSITION,
            metrics: CellMetrics::new(cli.cell_width, cli.cell_height),
            margin: cli.margin,
            width: cli.width,
            height: cli.height,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), PipError> {
    let cli = Cli::parse();
    let config = PopoverConfig::try_from(&cli)?;
    let level = if cli.verbose {
        Level::TRACE
    } else {
        Level::DEBUG
    };
    tracing_sub::init(cli.log_file.as_deref(), level)?;
    tracing::info!(?config, "starting popover demo");

    let outside_taps = Rc::new(Cell::new(0usize));
    let tap_counter = Rc::clone(&outside_taps);
    let alignment = Binding::new(Alignment::from(cli.corner))
        .with_on_change(|alignment| tracing::info!(?alignment, "popover moved"));
    let mut popover = Popover::new(
        LabelComponent::new("picture in picture", "drag me around"),
        alignment,
        Binding::new(true),
        config,
    )
    .on_outside_tap(move || tap_counter.set(tap_counter.get() + 1));

    let notifier = KeyboardNotifier::new();
    popover.mount(&notifier);
    let mapper = PointerMapper::new(config.metrics);
    let mut keyboard_visible = false;

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut driver = ConsoleInputDriver::new();
    driver.set_mouse_capture(true)?;
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(16));

    let result = event_loop.run(|_, event| {
        match event {
            LoopEvent::Tick(now) => {
                popover.tick(now);
                let taps = outside_taps.get();
                output.draw(|mut frame| {
                    draw(&mut frame, &mut popover, keyboard_visible, taps, now);
                })?;
            }
            LoopEvent::Input(input) => match input.event {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => return Ok(ControlFlow::Quit),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(ControlFlow::Quit);
                    }
                    KeyCode::Char('k') => {
                        keyboard_visible = true;
                        notifier.notify(KeyboardEvent::WillShow);
                    }
                    KeyCode::Char('K') => {
                        keyboard_visible = false;
                        notifier.notify(KeyboardEvent::WillHide);
                    }
                    KeyCode::Char('p') => popover.set_presented(!popover.is_presented()),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = mapper.map(&mouse, input.timestamp) {
                        popover.handle_pointer(&pointer);
                    }
                }
                Event::FocusLost => {
                    popover.handle_pointer(&PointerEvent::cancelled(
                        Point::default(),
                        input.timestamp,
                    ));
                }
                _ => {}
            },
        }
        Ok(ControlFlow::Continue)
    });

    output.exit()?;
    popover.unmount();
    result.map_err(PipError::from)
}

fn draw(
    frame: &mut UiFrame<'_>,
    popover: &mut Popover<LabelComponent>,
    keyboard_visible: bool,
    outside_taps: usize,
    now: Timestamp,
) {
    let area = frame.area();
    let keyboard_rows = if keyboard_visible { KEYBOARD_ROWS } else { 0 };
    let [host, status, keyboard] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(keyboard_rows),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(HOST_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false }),
        host,
    );
    frame.render_widget(
        Paragraph::new(status_line(popover, outside_taps))
            .style(Style::default().add_modifier(Modifier::REVERSED)),
        status,
    );
    if keyboard_visible {
        render_keyboard(frame, keyboard);
    }
    popover.render(frame, host, now);
}

fn status_line(popover: &Popover<LabelComponent>, outside_taps: usize) -> String {
    let alignment = popover.alignment();
    format!(
        " {:?}/{:?}  drag: {:?}  outside taps: {}  popover taps: {}",
        alignment.horizontal,
        alignment.vertical,
        popover.session().phase(),
        outside_taps,
        popover.content().taps()
    )
}

fn render_keyboard(frame: &mut UiFrame<'_>, area: Rect) {
    let rows = ["q w e r t y u i o p", "a s d f g h j k l", "z x c v b n m"];
    frame.render_widget(
        Paragraph::new(rows.join("\n"))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::bordered().title(" keyboard ")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_a_valid_config() {
        let cli = Cli::try_parse_from(["term-pip"]).unwrap();
        let config = PopoverConfig::try_from(&cli).unwrap();
        assert_eq!(config.drag_threshold, DRAG_THRESHOLD);
        assert_eq!(config.first_move_window, Duration::from_millis(300));
        assert_eq!(Alignment::from(cli.corner), Alignment::BOTTOM_TRAILING);
    }

    #[test]
    fn overrides_flow_into_config() {
        let cli = Cli::try_parse_from([
            "term-pip",
            "--threshold",
            "24",
            "--first-move-ms",
            "150",
            "--corner",
            "top-leading",
        ])
        .unwrap();
        let config = PopoverConfig::try_from(&cli).unwrap();
        assert_eq!(config.drag_threshold, 24.0);
        assert_eq!(config.first_move_window, Duration::from_millis(150));
        assert_eq!(Alignment::from(cli.corner), Alignment::TOP_LEADING);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cli = Cli::try_parse_from(["term-pip", "--cell-width", "0"]).unwrap();
        assert!(matches!(
            PopoverConfig::try_from(&cli),
            Err(PipError::InvalidConfig(_))
        ));
    }
}
