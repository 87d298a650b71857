use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use term_pip::components::LabelComponent;
use term_pip::ui::UiFrame;
use term_pip::{Alignment, Binding, Popover, PopoverConfig, Timestamp};

fn popover(alignment: Alignment) -> Popover<LabelComponent> {
    let config = PopoverConfig {
        width: 12,
        height: 5,
        margin: 0,
        ..PopoverConfig::default()
    };
    Popover::new(
        LabelComponent::new("pip", "hi"),
        Binding::new(alignment),
        Binding::new(true),
        config,
    )
}

fn render(popover: &mut Popover<LabelComponent>) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            let mut ui = UiFrame::new(frame);
            popover.render(&mut ui, area, Timestamp::ZERO);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

fn symbol(buffer: &Buffer, x: u16, y: u16) -> &str {
    buffer.cell((x, y)).map(|cell| cell.symbol()).unwrap_or("")
}

#[test]
fn draws_chrome_in_resting_corner() {
    let mut p = popover(Alignment::TOP_LEADING);
    let buffer = render(&mut p);
    assert_eq!(symbol(&buffer, 0, 0), "╭");
    assert_eq!(symbol(&buffer, 11, 4), "╯");
    assert_eq!(symbol(&buffer, 39, 11), " ");

    let mut p = popover(Alignment::BOTTOM_TRAILING);
    let buffer = render(&mut p);
    assert_eq!(symbol(&buffer, 28, 7), "╭");
    assert_eq!(symbol(&buffer, 39, 11), "╯");
}

#[test]
fn hidden_popover_draws_nothing() {
    let mut p = popover(Alignment::TOP_LEADING);
    p.set_presented(false);
    let buffer = render(&mut p);
    assert_eq!(symbol(&buffer, 0, 0), " ");
}

#[test]
fn render_records_bounds_for_hit_testing() {
    let mut p = popover(Alignment::BOTTOM_TRAILING);
    render(&mut p);
    assert_eq!(p.bounds().width, 40);
    assert_eq!(p.resting_rect().x, 28);
    assert_eq!(p.resting_rect().y, 7);
}
