use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Sparkline, Wrap},
    Frame,
};

use crate::app::{App, Modal};
use crate::pages::assessment::QUESTIONS;
use crate::pages::contacts::ContactsView;
use crate::pages::dashboard::DashboardView;
use crate::pages::{admin::AdminView, education, home, PageView};
use crate::router::Page;
use crate::session::SessionState;

use super::form::{FieldKind, Form};

pub fn draw(frame: &mut Frame, app: &App) {
    // Sidebar navigation on the left, current page on the right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(frame.area());

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Page body
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[1]);

    render_sidebar(frame, app, main_chunks[0]);
    render_header(frame, app, right_chunks[0]);
    render_page(frame, app, right_chunks[1]);
    render_status(frame, app, right_chunks[2]);

    match &app.modal {
        Some(Modal::Form(form)) => render_form(frame, form),
        Some(Modal::Message { title, body }) => render_message(frame, title, body),
        Some(Modal::Confirm(confirm)) => render_message(frame, "Confirm", &format!("{}\n\n y: yes   n: no", confirm.prompt())),
        None => {}
    }

    // Render help popup if active
    if app.show_help {
        render_help(frame);
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let key = (i + 1) % 10;
            let style = if app.router.is_active(*page) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{key} "), Style::default().fg(Color::DarkGray)),
                Span::styled(page.label(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" REVA ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(List::new(items).block(block), area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.router.current();
    let who = match app.session.state() {
        SessionState::Admin => "Admin".to_string(),
        SessionState::User => app.current_user.clone().unwrap_or_default(),
        SessionState::Guest => "Guest".to_string(),
    };

    let block = Block::default()
        .title(format!(" {} ", page.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled("User: ", Style::default().fg(Color::DarkGray)),
        Span::styled(who, Style::default().fg(Color::White)),
        Span::styled(format!("   {}", page.path()), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status {
        Some(status) => status.clone(),
        None => page_hints(&app.view).to_string(),
    };
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn page_hints(view: &PageView) -> &'static str {
    match view {
        PageView::Home => "Enter:enter app  l:login  r:register  ?:help  q:quit",
        PageView::Logs(_) => "a:add  e/Enter:edit  d:delete  C:clear  x:export CSV  ?:help",
        PageView::Reminders(_) | PageView::Appointments(_) => "a:add  d:delete  j/k:nav  ?:help",
        PageView::Assessment => "a/Enter:start self-check  ?:help",
        PageView::Contacts(_) => "c/a:contact us  ?:help",
        PageView::Admin(_) => "j/k:nav  Enter:view user data  O:logout admin  ?:help",
        PageView::LoginRequired(_) => "l:login  r:register  ?:help",
        PageView::AdminRequired => "A:admin login  ?:help",
        _ => "Tab:next page  1-0:jump  u:login/logout  ?:help  q:quit",
    }
}

fn body_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::styled(text.into(), Style::default().fg(Color::DarkGray))
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    match &app.view {
        PageView::Home => render_home(frame, area),
        PageView::Dashboard(view) => render_dashboard(frame, view, area),
        PageView::Logs(logs) => {
            let width = area.width.saturating_sub(6).max(10) as usize;
            let items = logs
                .iter()
                .map(|log| {
                    let mut lines = vec![Line::from(vec![
                        Span::styled(log.date.format("%Y-%m-%d").to_string(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(format!(" • Mood {}", log.mood)),
                    ])];
                    let med = if log.med_taken { " • Med taken" } else { "" };
                    lines.push(muted(format!("{}{}", log.symptoms.join(", "), med)));
                    for note in textwrap::wrap(&log.notes, width) {
                        lines.push(Line::raw(note.into_owned()));
                    }
                    ListItem::new(lines)
                })
                .collect();
            render_list(frame, app, area, "Recent", items, "No logs yet.");
        }
        PageView::Reminders(reminders) => {
            let items = reminders
                .iter()
                .map(|r| {
                    let note = if r.note.is_empty() { String::new() } else { format!(" • {}", r.note) };
                    ListItem::new(vec![
                        Line::styled(r.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        muted(format!("{}{}", r.dt.format("%Y-%m-%d %H:%M"), note)),
                    ])
                })
                .collect();
            render_list(frame, app, area, "Upcoming reminders", items, "No reminders");
        }
        PageView::Appointments(appointments) => {
            let items = appointments
                .iter()
                .map(|a| {
                    ListItem::new(vec![
                        Line::styled(a.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        muted(format!(
                            "{} {} • {} mins",
                            a.date.format("%Y-%m-%d"),
                            a.time.format("%H:%M"),
                            a.duration
                        )),
                    ])
                })
                .collect();
            render_list(frame, app, area, "Upcoming appointments", items, "No appointments");
        }
        PageView::Resources(articles) => {
            let width = area.width.saturating_sub(6).max(10) as usize;
            let items = articles
                .iter()
                .map(|a| {
                    let mut lines = vec![
                        Line::styled(a.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        muted(a.summary.clone()),
                    ];
                    lines.extend(a.body_text(width).lines().map(|l| Line::raw(l.to_string())));
                    lines.push(Line::raw(""));
                    ListItem::new(lines)
                })
                .collect();
            render_list(frame, app, area, "Educational articles", items, "No articles.");
        }
        PageView::Education => render_education(frame, area),
        PageView::Assessment => {
            let mut lines = vec![muted("This is educational only; not a diagnosis."), Line::raw("")];
            for (i, q) in QUESTIONS.iter().enumerate() {
                let options: Vec<_> = q.options.iter().map(|(label, _)| *label).collect();
                lines.push(Line::raw(format!("{}) {}  [{}]", i + 1, q.prompt, options.join(" / "))));
            }
            lines.push(Line::raw(""));
            lines.push(muted("Press a or Enter to answer and get guidance."));
            frame.render_widget(Paragraph::new(lines).block(body_block("Self-Check")), area);
        }
        PageView::Contacts(view) => render_contacts(frame, view, area),
        PageView::Admin(view) => render_admin(frame, app, view, area),
        PageView::LoginRequired(page) => {
            let lines = vec![
                Line::raw(format!("Sign in to use {}.", page.label())),
                Line::raw(""),
                muted("l: login   r: register"),
            ];
            frame.render_widget(Paragraph::new(lines).block(body_block("Sign in required")), area);
        }
        PageView::AdminRequired => {
            let lines = vec![
                Line::raw("Admin access required."),
                Line::raw(""),
                muted("A: admin login"),
            ];
            frame.render_widget(Paragraph::new(lines).block(body_block("Admin")), area);
        }
    }
}

fn render_list(frame: &mut Frame, app: &App, area: Rect, title: &str, items: Vec<ListItem>, empty: &str) {
    if items.is_empty() {
        let paragraph = Paragraph::new(muted(empty.to_string())).block(body_block(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items)
        .block(body_block(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_home(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::styled(home::TITLE, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Line::raw(""),
        muted(home::INTRO),
        Line::raw(""),
        Line::raw("Why use REVA Wellness?"),
    ];
    lines.extend(home::FEATURES.iter().map(|f| Line::raw(format!("  • {f}"))));
    lines.push(Line::raw(""));
    lines.push(muted("Enter: enter app   l: login   r: register"));

    let paragraph = Paragraph::new(lines)
        .block(body_block("Home"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_dashboard(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[0]);

    let welcome = Paragraph::new(vec![
        muted("This dashboard shows your data."),
        muted(format!("{} logs recorded. Press 3 to add a log.", view.log_count)),
    ])
    .block(body_block("Welcome"))
    .wrap(Wrap { trim: true });
    frame.render_widget(welcome, top[0]);

    let average = Paragraph::new(Line::styled(
        view.average_label(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))
    .block(body_block("Average mood (all logs)"));
    frame.render_widget(average, top[1]);

    let title = format!("Mood trend (last {})", view.values.len());
    let block = body_block(&title);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if view.values.is_empty() {
        frame.render_widget(Paragraph::new(muted("No logs yet.")), inner);
        return;
    }

    let trend_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let sparkline = Sparkline::default()
        .data(&view.values)
        .max(10)
        .style(Style::default().fg(Color::Green));
    frame.render_widget(sparkline, trend_chunks[0]);

    let range = match (view.labels.first(), view.labels.last()) {
        (Some(first), Some(last)) => format!("{first} → {last}"),
        _ => String::new(),
    };
    frame.render_widget(Paragraph::new(muted(range)), trend_chunks[1]);
}

fn render_education(frame: &mut Frame, area: Rect) {
    let mut lines = vec![muted("Useful normal ranges and quick educational tips."), Line::raw("")];
    for range in &education::NORMAL_RANGES {
        lines.push(Line::styled(range.name, Style::default().add_modifier(Modifier::BOLD)));
        lines.push(muted(range.range));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Quick tips"));
    lines.extend(education::TIPS.iter().map(|t| Line::raw(format!("  • {t}"))));

    let paragraph = Paragraph::new(lines)
        .block(body_block("Health Info"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_contacts(frame: &mut Frame, view: &ContactsView, area: Rect) {
    let mut lines = vec![
        muted("Messages submitted via Contact Us. Signed-in users see their messages; Admin can view all."),
        Line::raw(""),
    ];

    let message_lines = |lines: &mut Vec<Line<'static>>, m: &crate::models::ContactMessage| {
        lines.push(Line::styled(
            format!("{} — {}", m.name, m.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(muted(m.email.clone()));
        lines.push(Line::raw(m.msg.clone()));
        lines.push(Line::raw(""));
    };

    match view {
        ContactsView::Own(messages) => {
            lines.push(Line::raw("Your messages"));
            if messages.is_empty() {
                lines.push(muted("You have not submitted any messages."));
            }
            for m in messages {
                message_lines(&mut lines, m);
            }
        }
        ContactsView::All(groups) => {
            if groups.is_empty() {
                lines.push(muted("No messages from users."));
            }
            for (account, messages) in groups {
                lines.push(Line::styled(
                    format!("{} — {}", account.name, account.email),
                    Style::default().fg(Color::Cyan),
                ));
                for m in messages {
                    message_lines(&mut lines, m);
                }
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(body_block("Contacts"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_admin(frame: &mut Frame, app: &App, view: &AdminView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(area);

    let items = view
        .accounts
        .iter()
        .map(|u| {
            ListItem::new(vec![
                Line::styled(u.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                muted(u.email.clone()),
            ])
        })
        .collect();
    render_list(frame, app, chunks[0], "Registered users", items, "No registered users");

    let (title, body) = match &view.inspected {
        Some((id, json)) => (id.as_str(), json.as_str()),
        None => ("User data", "Select a user and press Enter to inspect their local data."),
    };
    let paragraph = Paragraph::new(body)
        .block(body_block(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[1]);
}

fn render_form(frame: &mut Frame, form: &Form) {
    let height = (form.fields.len() as u16) * 2 + 6;
    let area = fixed_height_rect(60, height, frame.area());

    let block = Block::default()
        .title(format!(" {} ", form.kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::styled(field.label, label_style));

        let cursor = match field.kind {
            FieldKind::Text | FieldKind::Secret if focused => "_",
            _ => "",
        };
        lines.push(Line::raw(format!("> {}{}", field.display(), cursor)));
    }

    lines.push(Line::raw(""));
    match &form.error {
        Some(error) => lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red))),
        None => lines.push(muted("Tab:next  ←/→:choose  Space:toggle  Enter:submit  Esc:cancel")),
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_message(frame: &mut Frame, title: &str, body: &str) {
    let area = centered_rect(50, 30, frame.area());

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(body.to_string())
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());

    let help_text = vec![
        "",
        " Navigation:",
        "   Tab / S-Tab  Next / previous page",
        "   1-9, 0       Jump to page",
        "   j / ↓        Move down",
        "   k / ↑        Move up",
        "   Enter        Select / Edit / View",
        "",
        " Actions:",
        "   a            Add entry / start self-check",
        "   e            Edit selected log",
        "   d            Delete selected entry",
        "   C            Clear all logs",
        "   x            Export logs as CSV",
        "   c            Contact us",
        "",
        " Account:",
        "   l / r        Login / Register",
        "   u            Login or logout",
        "   A / O        Admin login / logout",
        "",
        " General:",
        "   ?            Toggle this help",
        "   q            Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn fixed_height_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    horizontal_center(percent_x, popup_layout[1])
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    horizontal_center(percent_x, popup_layout[1])
}

fn horizontal_center(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(r)[1]
}
