use crate::application::{App, AppMode, Screen};
use crate::domain::{District, format_mwk};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Home => render_home(f, app, chunks[1]),
        Screen::Seller => render_seller(f, app, chunks[1]),
        Screen::Buyer => render_buyer(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if let Some(ref notice) = app.notice {
        render_notice_popup(f, notice);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let who = app
        .session
        .as_ref()
        .map(|s| s.user.email.as_str())
        .unwrap_or("signed out");
    let header = Paragraph::new(format!("pay265 - Malawi marketplace (MWK) | {}", who))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    if app.products.is_empty() {
        let empty = Paragraph::new("No products listed yet")
            .block(Block::default().borders(Borders::ALL).title("Products"));
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        ["Title", "Seller", "District", "Price", "Status", "Method"]
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow))),
    )
    .height(1);

    let mut rows = vec![header];
    for (i, product) in app.products.iter().enumerate() {
        let style = if i == app.selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        rows.push(
            Row::new([
                Cell::from(product.title.clone()),
                Cell::from(product.seller_name.clone()),
                Cell::from(product.district.label()),
                Cell::from(format_mwk(product.price_mwk)),
                Cell::from(product.status().label()),
                Cell::from(app.method_for(product.id).label()),
            ])
            .style(style)
            .height(1),
        );
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Products"))
    .column_spacing(1);

    f.render_widget(table, area);
}

fn form_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(value, value_style),
    ])
}

fn masked(password: &str) -> String {
    "*".repeat(password.chars().count())
}

fn render_seller(f: &mut Frame, app: &App, area: Rect) {
    let lines = if app.session.is_none() {
        let district = District::ALL[app.seller_form.district_index];
        vec![
            Line::from("Create seller account"),
            Line::from(""),
            form_line("Name", app.seller_form.name.clone(), app.focused_field == 0),
            form_line("Email", app.seller_form.email.clone(), app.focused_field == 1),
            form_line(
                "Password",
                masked(&app.seller_form.password),
                app.focused_field == 2,
            ),
            form_line(
                "District",
                format!("< {} >", district),
                app.focused_field == 3,
            ),
            Line::from(""),
            Line::from("Enter: create seller | Esc: home"),
        ]
    } else {
        let district = District::ALL[app.product_form.district_index];
        vec![
            Line::from("Add product"),
            Line::from(""),
            form_line("Title", app.product_form.title.clone(), app.focused_field == 0),
            form_line(
                "Price MWK",
                app.product_form.price.clone(),
                app.focused_field == 1,
            ),
            form_line(
                "District",
                format!("< {} >", district),
                app.focused_field == 2,
            ),
            Line::from(""),
            Line::from("Enter: add product | Esc: home"),
        ]
    };

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Seller Dashboard"));
    f.render_widget(panel, area);
}

fn render_buyer(f: &mut Frame, app: &App, area: Rect) {
    let lines = match app.session {
        None => vec![
            Line::from("Create buyer account / login"),
            Line::from(""),
            form_line("Name", app.buyer_form.name.clone(), app.focused_field == 0),
            form_line("Email", app.buyer_form.email.clone(), app.focused_field == 1),
            form_line(
                "Password",
                masked(&app.buyer_form.password),
                app.focused_field == 2,
            ),
            Line::from(""),
            Line::from("Enter: login | Ctrl+N: create buyer | Esc: home"),
        ],
        Some(ref session) => vec![
            Line::from(session.user.email.clone()),
            Line::from("Buyer account"),
            Line::from(""),
            Line::from("p: browse products"),
        ],
    };

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Buyer Account"));
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.mode {
            AppMode::Browse => match app.screen {
                Screen::Home => {
                    "1/2/3: screens | Up/Down: select | m: method | Enter: buy | e: export CSV | o: logout | q: quit"
                        .to_string()
                }
                Screen::Seller | Screen::Buyer => {
                    "p: browse products | 1/2/3: screens | o: logout | q: quit".to_string()
                }
            },
            AppMode::Form => {
                "Tab/Up/Down: fields | Left/Right: district | Enter: submit | Esc: home"
                    .to_string()
            }
            AppMode::ExportCsv => format!(
                "Export CSV as: {} (Enter to export, Esc to cancel)",
                app.filename_input
            ),
        }
    };

    let bar = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Browse => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(bar, area);
}

fn render_notice_popup(f: &mut Frame, notice: &str) {
    let area = f.area();
    let top = area.height / 3;
    let popup_area = Rect {
        x: area.width / 6,
        y: top,
        width: area.width * 2 / 3,
        height: 7.min(area.height.saturating_sub(top)),
    };

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(format!("{}\n\npress any key", notice))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductStatus};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(width: u16, height: u16, app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_notice_popup_fits_short_terminals() {
        let mut app = App::default();
        app.notice = Some("Backend unavailable: connection refused".to_string());
        for height in 4..=12 {
            let terminal = draw(40, height, &app);
            assert!(screen_text(&terminal).contains("Notice"));
        }
    }

    #[test]
    fn test_home_listing_reads_row_status() {
        let mut app = App::default();
        app.products = vec![
            Product {
                id: 2,
                title: "Maize bag".to_string(),
                price_mwk: Some(15000),
                seller_name: "Grace".to_string(),
                district: District::Zomba,
                status: Some(ProductStatus::Available),
            },
            Product {
                id: 1,
                title: "Charcoal".to_string(),
                price_mwk: None,
                seller_name: "Chimwemwe".to_string(),
                district: District::Mzimba,
                status: None,
            },
        ];
        let terminal = draw(100, 24, &app);
        let text = screen_text(&terminal);
        assert_eq!(text.matches("available").count(), 2);
        assert!(text.contains("MWK 15,000"));
    }
}
