use crate::application::{App, AppMode, Screen};
use crate::domain::{CsvExporter, DomainClient};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        client: &mut dyn DomainClient,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) {
        // A notice blocks everything; the dismissing key is swallowed.
        if app.notice.is_some() {
            app.dismiss_notice();
            return;
        }
        match app.mode {
            AppMode::Browse => Self::handle_browse_mode(app, client, key),
            AppMode::Form => Self::handle_form_mode(app, client, key, modifiers),
            AppMode::ExportCsv => Self::handle_export_filename_mode(app, key),
        }
    }

    fn handle_browse_mode(app: &mut App, client: &mut dyn DomainClient, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Char('1') | KeyCode::Char('h') => app.navigate(Screen::Home),
            KeyCode::Char('2') | KeyCode::Char('s') => app.navigate(Screen::Seller),
            KeyCode::Char('3') | KeyCode::Char('b') => app.navigate(Screen::Buyer),
            KeyCode::Char('o') if app.session.is_some() => app.sign_out(client),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char('m') if app.screen == Screen::Home => app.cycle_method(),
            KeyCode::Enter if app.screen == Screen::Home => app.place_order(client),
            KeyCode::Char('e') if app.screen == Screen::Home => app.start_csv_export(),
            KeyCode::Char('p') if app.screen == Screen::Buyer => app.navigate(Screen::Home),
            _ => {}
        }
    }

    fn handle_form_mode(
        app: &mut App,
        client: &mut dyn DomainClient,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) {
        match key {
            KeyCode::Esc => app.navigate(Screen::Home),
            KeyCode::Tab | KeyCode::Down => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
            KeyCode::Left => app.cycle_district(false),
            KeyCode::Right => app.cycle_district(true),
            KeyCode::Enter => Self::submit_form(app, client),
            KeyCode::Backspace => {
                if let Some(field) = app.focused_text_field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char('n')
                if modifiers.contains(KeyModifiers::CONTROL) && app.screen == Screen::Buyer =>
            {
                app.submit_buyer_signup(client);
            }
            KeyCode::Char(c) => {
                if let Some(field) = app.focused_text_field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn submit_form(app: &mut App, client: &mut dyn DomainClient) {
        match (app.screen, app.session.is_some()) {
            (Screen::Seller, false) => app.submit_seller_signup(client),
            (Screen::Seller, true) => app.submit_product(client),
            (Screen::Buyer, false) => app.submit_sign_in(client),
            _ => {}
        }
    }

    fn handle_export_filename_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_products(&app.products, &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_csv_export();
            }
            KeyCode::Backspace => {
                app.filename_input.pop();
            }
            KeyCode::Char(c) => {
                app.filename_input.push(c);
            }
            _ => {}
        }
    }
}
