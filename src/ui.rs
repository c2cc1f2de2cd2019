// 🖥️ Budget Dashboard UI - Interactive terminal dashboard
// Sidebar forms feed the record store; every frame recomputes all aggregates
// from the store, so the views never diverge from its contents

use crate::export::{export_expenses, export_income};
use crate::model::{Category, Priority};
use crate::report::{
    balance_percent_of_income, budget_rule, category_breakdown, expense_ratio, health_assessment,
    priority_breakdown, remaining_balance, spending_note, total_expenses, total_income,
    HealthAssessment, SpendingNote,
};
use crate::store::BudgetStore;
use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState,
        Wrap,
    },
    Frame, Terminal,
};
use std::io;

// ============================================================================
// PAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Breakdown,
    Charts,
    Recommendations,
    Details,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Breakdown => Page::Charts,
            Page::Charts => Page::Recommendations,
            Page::Recommendations => Page::Details,
            Page::Details => Page::Breakdown,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Breakdown => Page::Details,
            Page::Charts => Page::Breakdown,
            Page::Recommendations => Page::Charts,
            Page::Details => Page::Recommendations,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Breakdown => "Budget Breakdown",
            Page::Charts => "Visualizations",
            Page::Recommendations => "Recommendations",
            Page::Details => "Details",
        }
    }
}

// ============================================================================
// INPUT FORMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddIncome,
    AddExpense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeField {
    Name,
    Amount,
}

impl IncomeField {
    pub fn next(&self) -> Self {
        match self {
            IncomeField::Name => IncomeField::Amount,
            IncomeField::Amount => IncomeField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Category,
    Name,
    Amount,
    Priority,
}

impl ExpenseField {
    pub fn next(&self) -> Self {
        match self {
            ExpenseField::Category => ExpenseField::Name,
            ExpenseField::Name => ExpenseField::Amount,
            ExpenseField::Amount => ExpenseField::Priority,
            ExpenseField::Priority => ExpenseField::Category,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ExpenseField::Category => ExpenseField::Priority,
            ExpenseField::Name => ExpenseField::Category,
            ExpenseField::Amount => ExpenseField::Name,
            ExpenseField::Priority => ExpenseField::Amount,
        }
    }
}

/// Text buffers behind the "Add Income" form
#[derive(Debug, Clone)]
pub struct IncomeForm {
    pub name: String,
    pub amount: String,
    pub field: IncomeField,
}

impl IncomeForm {
    fn new() -> Self {
        IncomeForm {
            name: String::new(),
            amount: String::new(),
            field: IncomeField::Name,
        }
    }
}

/// Buffers and enum selections behind the "Add Expense" form
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub category: Category,
    pub name: String,
    pub amount: String,
    pub priority: Priority,
    pub field: ExpenseField,
}

impl ExpenseForm {
    fn new() -> Self {
        ExpenseForm {
            category: Category::Housing,
            name: String::new(),
            amount: String::new(),
            priority: Priority::Medium,
            field: ExpenseField::Category,
        }
    }
}

/// One-line feedback shown in the status bar after an action
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn ok(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: true,
        }
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub store: BudgetStore,
    pub current_page: Page,
    pub input_mode: InputMode,
    pub income_form: IncomeForm,
    pub expense_form: ExpenseForm,
    pub status: Option<StatusMessage>,
    pub expense_table_state: TableState,
}

impl App {
    pub fn new(store: BudgetStore) -> Self {
        Self {
            store,
            current_page: Page::Breakdown,
            input_mode: InputMode::Normal,
            income_form: IncomeForm::new(),
            expense_form: ExpenseForm::new(),
            status: None,
            expense_table_state: TableState::default(),
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn open_income_form(&mut self) {
        self.income_form = IncomeForm::new();
        self.input_mode = InputMode::AddIncome;
        self.status = None;
    }

    pub fn open_expense_form(&mut self) {
        self.expense_form = ExpenseForm::new();
        self.input_mode = InputMode::AddExpense;
        self.status = None;
    }

    pub fn cancel_form(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Submit the income form; on rejection the form stays open
    pub fn submit_income(&mut self) {
        let amount = match parse_amount(&self.income_form.amount) {
            Ok(a) => a,
            Err(msg) => {
                self.status = Some(StatusMessage::error(msg));
                return;
            }
        };

        let name = self.income_form.name.clone();
        match self.store.add_income(&name, amount) {
            Ok(()) => {
                self.status = Some(StatusMessage::ok(format!("Added {}!", name.trim())));
                self.income_form = IncomeForm::new();
                self.input_mode = InputMode::Normal;
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(err.to_string()));
            }
        }
    }

    /// Submit the expense form; on rejection the form stays open
    pub fn submit_expense(&mut self) {
        let amount = match parse_amount(&self.expense_form.amount) {
            Ok(a) => a,
            Err(msg) => {
                self.status = Some(StatusMessage::error(msg));
                return;
            }
        };

        let name = self.expense_form.name.clone();
        let category = self.expense_form.category;
        let priority = self.expense_form.priority;
        match self.store.add_expense(category, &name, amount, priority) {
            Ok(()) => {
                self.status = Some(StatusMessage::ok(format!("Added {}!", name.trim())));
                self.expense_form = ExpenseForm::new();
                self.input_mode = InputMode::Normal;
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(err.to_string()));
            }
        }
    }

    /// Empty both collections in one step
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.expense_table_state.select(None);
        self.status = Some(StatusMessage::ok("Cleared all data"));
    }

    /// Write both CSV files into the current directory
    pub fn export_csv(&mut self) {
        let today = Local::now().date_naive();
        let dir = std::path::PathBuf::from(".");

        let result = export_income(&self.store, &dir, today).and_then(|income_path| {
            export_expenses(&self.store, &dir, today).map(|expense_path| {
                format!(
                    "Exported {} and {}",
                    income_path.display(),
                    expense_path.display()
                )
            })
        });

        self.status = Some(match result {
            Ok(text) => StatusMessage::ok(text),
            Err(err) => StatusMessage::error(format!("Export failed: {}", err)),
        });
    }

    pub fn next_row(&mut self) {
        let len = self.store.expenses().len();
        if len == 0 {
            return;
        }
        let i = match self.expense_table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.expense_table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.store.expenses().len();
        if len == 0 {
            return;
        }
        let i = match self.expense_table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.expense_table_state.select(Some(i));
    }
}

/// Parse a form amount buffer into a number; the store validates positivity
fn parse_amount(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| "Amount must be a number".to_string())
}

/// Format dollars with thousands separators, e.g. `$1,234.56`
fn fmt_money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}.{:02}", grouped, frac)
    } else {
        format!("${}.{:02}", grouped, frac)
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => Color::Red,
        Priority::High => Color::Yellow,
        Priority::Medium => Color::Green,
        Priority::Low => Color::Blue,
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Tab => {
                        if key.modifiers.contains(KeyModifiers::SHIFT) {
                            app.previous_page();
                        } else {
                            app.next_page();
                        }
                    }
                    KeyCode::BackTab => app.previous_page(),
                    KeyCode::Char('i') => app.open_income_form(),
                    KeyCode::Char('e') => app.open_expense_form(),
                    KeyCode::Char('x') => app.export_csv(),
                    KeyCode::Char('C') => app.clear_all(),
                    KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
                    _ => {}
                },
                InputMode::AddIncome => match key.code {
                    KeyCode::Esc => app.cancel_form(),
                    KeyCode::Enter => app.submit_income(),
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                        // Two fields, so next and previous coincide
                        app.income_form.field = app.income_form.field.next();
                    }
                    KeyCode::Backspace => {
                        match app.income_form.field {
                            IncomeField::Name => app.income_form.name.pop(),
                            IncomeField::Amount => app.income_form.amount.pop(),
                        };
                    }
                    KeyCode::Char(c) => match app.income_form.field {
                        IncomeField::Name => app.income_form.name.push(c),
                        IncomeField::Amount => {
                            if c.is_ascii_digit() || c == '.' {
                                app.income_form.amount.push(c);
                            }
                        }
                    },
                    _ => {}
                },
                InputMode::AddExpense => match key.code {
                    KeyCode::Esc => app.cancel_form(),
                    KeyCode::Enter => app.submit_expense(),
                    KeyCode::Tab | KeyCode::Down => {
                        app.expense_form.field = app.expense_form.field.next();
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        app.expense_form.field = app.expense_form.field.previous();
                    }
                    KeyCode::Left => match app.expense_form.field {
                        ExpenseField::Category => {
                            app.expense_form.category = app.expense_form.category.previous();
                        }
                        ExpenseField::Priority => {
                            app.expense_form.priority = app.expense_form.priority.previous();
                        }
                        _ => {}
                    },
                    KeyCode::Right => match app.expense_form.field {
                        ExpenseField::Category => {
                            app.expense_form.category = app.expense_form.category.next();
                        }
                        ExpenseField::Priority => {
                            app.expense_form.priority = app.expense_form.priority.next();
                        }
                        _ => {}
                    },
                    KeyCode::Backspace => {
                        match app.expense_form.field {
                            ExpenseField::Name => app.expense_form.name.pop(),
                            ExpenseField::Amount => app.expense_form.amount.pop(),
                            _ => None,
                        };
                    }
                    KeyCode::Char(c) => match app.expense_form.field {
                        ExpenseField::Name => app.expense_form.name.push(c),
                        ExpenseField::Amount => {
                            if c.is_ascii_digit() || c == '.' {
                                app.expense_form.amount.push(c);
                            }
                        }
                        _ => {}
                    },
                    _ => {}
                },
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with page tabs
            Constraint::Length(3), // Metrics row
            Constraint::Min(0),    // Sidebar + page content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_metrics(f, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32), // Input sidebar
            Constraint::Percentage(68), // Page content
        ])
        .split(chunks[2]);

    render_sidebar(f, body[0], app);

    if app.store.is_empty() {
        render_empty_hint(f, body[1]);
    } else {
        match app.current_page {
            Page::Breakdown => render_breakdown(f, body[1], app),
            Page::Charts => render_charts(f, body[1], app),
            Page::Recommendations => render_recommendations(f, body[1], app),
            Page::Details => render_details(f, body[1], app),
        }
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [
        Page::Breakdown,
        Page::Charts,
        Page::Recommendations,
        Page::Details,
    ];

    let mut tab_spans = vec![Span::styled(
        "💰 Monthly Budget  ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} income", app.store.income_sources().len()),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("{} expenses", app.store.expenses().len()),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_metrics(f: &mut Frame, area: Rect, app: &App) {
    let income = total_income(&app.store);
    let expenses = total_expenses(&app.store);
    let balance = remaining_balance(&app.store);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let income_metric = Paragraph::new(Line::from(vec![
        Span::raw("💰 Total Income: "),
        Span::styled(
            fmt_money(income),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(income_metric, cols[0]);

    let expense_metric = Paragraph::new(Line::from(vec![
        Span::raw("💳 Total Expenses: "),
        Span::styled(
            fmt_money(expenses),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(expense_metric, cols[1]);

    let balance_color = if balance >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    let mut balance_spans = vec![
        Span::raw("💵 Remaining: "),
        Span::styled(
            fmt_money(balance),
            Style::default()
                .fg(balance_color)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    // Percentage only defined when there is income
    if let Some(pct) = balance_percent_of_income(&app.store) {
        balance_spans.push(Span::styled(
            format!(" ({:.1}% of income)", pct),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let balance_metric =
        Paragraph::new(Line::from(balance_spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(balance_metric, cols[2]);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    match app.input_mode {
        InputMode::Normal => render_action_menu(f, area, app),
        InputMode::AddIncome => render_income_form(f, area, app),
        InputMode::AddExpense => render_expense_form(f, area, app),
    }
}

fn render_action_menu(f: &mut Frame, area: Rect, app: &App) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  📊 Financial Inputs",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("i", Style::default().fg(Color::Yellow)),
            Span::raw("  Add income source"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("e", Style::default().fg(Color::Yellow)),
            Span::raw("  Add expense"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("x", Style::default().fg(Color::Yellow)),
            Span::raw("  Export CSV files"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("C", Style::default().fg(Color::Yellow)),
            Span::raw("  Clear all data"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{} income sources", app.store.income_sources().len()),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{} expenses", app.store.expenses().len()),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];

    let menu = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Inputs "),
    );

    f.render_widget(menu, area);
}

fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(if focused { "→ " } else { "  " }, label_style),
        Span::styled(format!("{:<10}", label), label_style),
        Span::raw(value),
    ];

    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    Line::from(spans)
}

fn render_income_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.income_form;

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  💵 Add Income Source",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line("Name", form.name.clone(), form.field == IncomeField::Name),
        Line::from(""),
        field_line(
            "Amount $",
            form.amount.clone(),
            form.field == IncomeField::Amount,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Tab next field - Enter add - Esc cancel",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let form_widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Add Income "),
    );

    f.render_widget(form_widget, area);
}

fn render_expense_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.expense_form;

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  💳 Add Monthly Expense",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line(
            "Category",
            format!("◀ {} ▶", form.category.as_str()),
            form.field == ExpenseField::Category,
        ),
        Line::from(""),
        field_line("Name", form.name.clone(), form.field == ExpenseField::Name),
        Line::from(""),
        field_line(
            "Amount $",
            form.amount.clone(),
            form.field == ExpenseField::Amount,
        ),
        Line::from(""),
        field_line(
            "Priority",
            format!("◀ {} ▶", form.priority.as_str()),
            form.field == ExpenseField::Priority,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Tab next field - Left/Right change selection",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            "  Enter add - Esc cancel",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let form_widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Add Expense "),
    );

    f.render_widget(form_widget, area);
}

fn render_empty_hint(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "👈 Start by adding your income sources and monthly expenses!",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The dashboard updates with insights and recommendations as you go.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(hint, area);
}

// ----------------------------------------------------------------------------
// Page: Budget Breakdown
// ----------------------------------------------------------------------------

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Income sources
    let mut income_lines = vec![Line::from("")];
    if app.store.income_sources().is_empty() {
        income_lines.push(Line::from(Span::styled(
            "  No income sources added yet",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for entry in app.store.income_sources() {
            income_lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::raw(entry.name.clone()),
                Span::raw(": "),
                Span::styled(fmt_money(entry.amount), Style::default().fg(Color::Green)),
            ]));
        }
    }

    let income_panel = Paragraph::new(income_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Income Sources "),
    );
    f.render_widget(income_panel, cols[0]);

    // Expense summary by priority, with share of total expenses
    let expenses = total_expenses(&app.store);
    let mut priority_lines = vec![Line::from("")];
    let breakdown = priority_breakdown(&app.store);
    if breakdown.is_empty() {
        priority_lines.push(Line::from(Span::styled(
            "  No expenses added yet",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (priority, amount) in breakdown {
            let percentage = if expenses > 0.0 {
                amount / expenses * 100.0
            } else {
                0.0
            };
            priority_lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(
                    format!("{:<8}", priority.as_str()),
                    Style::default().fg(priority_color(priority)),
                ),
                Span::raw(" "),
                Span::raw(fmt_money(amount)),
                Span::styled(
                    format!("  ({:.1}%)", percentage),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    let priority_panel = Paragraph::new(priority_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Expenses by Priority "),
    );
    f.render_widget(priority_panel, cols[1]);
}

// ----------------------------------------------------------------------------
// Page: Visualizations
// ----------------------------------------------------------------------------

fn render_charts(f: &mut Frame, area: Rect, app: &App) {
    if app.store.expenses().is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Add expenses to see the charts",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Visualizations "),
        );
        f.render_widget(hint, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_category_chart(f, cols[0], app);
    render_priority_chart(f, cols[1], app);
    render_income_gauge(f, rows[1], app);
}

/// Share of expenses per category, drawn as horizontal percent bars
fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let expenses = total_expenses(&app.store);
    let breakdown = category_breakdown(&app.store);

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|(category, amount)| {
            let percentage = amount / expenses * 100.0;
            Bar::default()
                .value(percentage.round() as u64)
                .label(Line::from(category.as_str()))
                .text_value(format!("{} ({:.1}%)", fmt_money(*amount), percentage))
                .style(Style::default().fg(Color::Cyan))
                .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .max(100)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Expenses by Category "),
        );

    f.render_widget(chart, area);
}

/// Expense totals per priority, most urgent first
fn render_priority_chart(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = priority_breakdown(&app.store);

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|(priority, amount)| {
            let color = priority_color(*priority);
            Bar::default()
                .value(amount.round() as u64)
                .label(Line::from(priority.as_str()))
                .text_value(fmt_money(*amount))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Expenses by Priority "),
        );

    f.render_widget(chart, area);
}

/// Gauge comparing total expenses against total income
fn render_income_gauge(f: &mut Frame, area: Rect, app: &App) {
    let income = total_income(&app.store);
    let expenses = total_expenses(&app.store);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Expenses vs Income ");

    // Ratio is undefined without income
    if income <= 0.0 {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Add income sources to compare spending against income",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let over_budget = expenses > income;
    let gauge_color = if over_budget { Color::Red } else { Color::Green };
    let ratio = (expenses / income).clamp(0.0, 1.0);

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(ratio)
        .label(format!(
            "{} of {} ({:.1}%)",
            fmt_money(expenses),
            fmt_money(income),
            expenses / income * 100.0
        ));

    f.render_widget(gauge, area);
}

// ----------------------------------------------------------------------------
// Page: Recommendations
// ----------------------------------------------------------------------------

fn render_recommendations(f: &mut Frame, area: Rect, app: &App) {
    let rule = match budget_rule(&app.store) {
        Some(rule) => rule,
        None => {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Add your income sources to see personalized recommendations!",
                    Style::default().fg(Color::Cyan),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .title(" 💡 Budget Recommendations "),
            );
            f.render_widget(hint, area);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    // 50/30/20 targets
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(rows[0]);

    let targets = [
        ("50% - Needs", rule.needs, "housing, utilities, food"),
        ("30% - Wants", rule.wants, "entertainment, hobbies"),
        ("20% - Savings", rule.savings, "emergency fund, investments"),
    ];
    for (i, (label, amount, detail)) in targets.iter().enumerate() {
        let target = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("  {}", label),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", fmt_money(*amount)),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", detail),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" 50/30/20 Rule "),
        );
        f.render_widget(target, cols[i]);
    }

    // Budget analysis narrative
    let mut analysis = vec![Line::from("")];

    match health_assessment(&app.store) {
        Some(HealthAssessment::Deficit { shortfall }) => {
            analysis.push(Line::from(Span::styled(
                format!("  ⚠️ Budget Deficit: {}", fmt_money(shortfall)),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            analysis.push(Line::from(""));
            analysis.push(Line::from(
                "  Your expenses exceed your income. Consider reviewing",
            ));
            analysis.push(Line::from(
                "  non-essential expenses and prioritizing critical ones.",
            ));
        }
        Some(HealthAssessment::LowSavings {
            remaining,
            savings_target,
        }) => {
            analysis.push(Line::from(Span::styled(
                "  ⚠️ Low Savings Rate",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            analysis.push(Line::from(""));
            analysis.push(Line::from(format!(
                "  You have {} remaining, below the recommended 20% ({}).",
                fmt_money(remaining),
                fmt_money(savings_target)
            )));
            analysis.push(Line::from(
                "  Try to reduce expenses or increase income to meet your savings goals.",
            ));
        }
        Some(HealthAssessment::Healthy { remaining }) => {
            analysis.push(Line::from(Span::styled(
                "  ✅ Good Budget Health!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            analysis.push(Line::from(""));
            analysis.push(Line::from(format!(
                "  You have {} remaining after expenses. Consider allocating it",
                fmt_money(remaining)
            )));
            analysis.push(Line::from(
                "  towards an emergency fund, retirement, or debt repayment.",
            ));
        }
        None => {}
    }

    if let Some(ratio) = expense_ratio(&app.store) {
        analysis.push(Line::from(""));
        analysis.push(Line::from(vec![
            Span::raw("  Your expense ratio: "),
            Span::styled(
                format!("{:.1}% of income", ratio),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        match spending_note(ratio) {
            Some(SpendingNote::HighSpending) => {
                analysis.push(Line::from(Span::styled(
                    "  Expenses consume more than 80% of income - reduce non-essential spending.",
                    Style::default().fg(Color::Yellow),
                )));
            }
            Some(SpendingNote::HealthySpending) => {
                analysis.push(Line::from(Span::styled(
                    "  Great job! You're spending 50% or less of your income.",
                    Style::default().fg(Color::Green),
                )));
            }
            None => {}
        }
    }

    let analysis_panel = Paragraph::new(analysis).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Your Budget Analysis "),
    );
    f.render_widget(analysis_panel, rows[1]);
}

// ----------------------------------------------------------------------------
// Page: Details
// ----------------------------------------------------------------------------

fn render_details(f: &mut Frame, area: Rect, app: &mut App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    // Income table
    let income_header = Row::new(["Name", "Amount"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let income_rows = app.store.income_sources().iter().map(|entry| {
        Row::new(vec![
            Cell::from(truncate(&entry.name, 24)),
            Cell::from(fmt_money(entry.amount)).style(Style::default().fg(Color::Green)),
        ])
        .height(1)
    });

    let income_table = Table::new(
        income_rows,
        [Constraint::Length(26), Constraint::Length(14)],
    )
    .header(income_header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Income Details "),
    );
    f.render_widget(income_table, cols[0]);

    // Expense table
    let expense_header = Row::new(["Category", "Name", "Amount", "Priority"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let expense_rows = app.store.expenses().iter().map(|entry| {
        let color = priority_color(entry.priority);
        Row::new(vec![
            Cell::from(truncate(entry.category.as_str(), 22)),
            Cell::from(truncate(&entry.name, 20)),
            Cell::from(fmt_money(entry.amount)),
            Cell::from(entry.priority.as_str()).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let expense_table = Table::new(
        expense_rows,
        [
            Constraint::Length(24),
            Constraint::Length(22),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(expense_header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Expense Details "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(expense_table, cols[1], &mut app.expense_table_state);
}

// ----------------------------------------------------------------------------
// Status bar
// ----------------------------------------------------------------------------

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(message) = &app.status {
        let color = if message.is_error {
            Color::Red
        } else {
            Color::Green
        };
        status_spans.push(Span::styled(
            format!(" {} ", message.text),
            Style::default().fg(color),
        ));
        status_spans.push(Span::raw("| "));
    }

    match app.input_mode {
        InputMode::Normal => {
            status_spans.push(Span::styled("i", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Income | "));
            status_spans.push(Span::styled("e", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Expense | "));
            status_spans.push(Span::styled("x", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Export | "));
            status_spans.push(Span::styled("C", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Clear | "));
            status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Page | "));
            status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Rows | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
        InputMode::AddIncome | InputMode::AddExpense => {
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Add | "));
            status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Field | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Cancel"));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle_round_trips() {
        let mut page = Page::Breakdown;
        for _ in 0..4 {
            page = page.next();
        }
        assert_eq!(page, Page::Breakdown);
        assert_eq!(Page::Breakdown.previous(), Page::Details);
    }

    #[test]
    fn test_submit_income_adds_entry_and_closes_form() {
        let mut app = App::new(BudgetStore::new());
        app.open_income_form();
        app.income_form.name = "Salary".to_string();
        app.income_form.amount = "5000".to_string();

        app.submit_income();

        assert_eq!(app.store.income_sources().len(), 1);
        assert_eq!(app.store.income_sources()[0].amount, 5000.0);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.status, Some(StatusMessage::ok("Added Salary!")));
    }

    #[test]
    fn test_submit_income_rejects_invalid_and_stays_open() {
        let mut app = App::new(BudgetStore::new());
        app.open_income_form();
        app.income_form.name = "Bonus".to_string();
        app.income_form.amount = "0".to_string();

        app.submit_income();

        assert!(app.store.income_sources().is_empty());
        assert_eq!(app.input_mode, InputMode::AddIncome);
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_submit_income_rejects_unparseable_amount() {
        let mut app = App::new(BudgetStore::new());
        app.open_income_form();
        app.income_form.name = "Salary".to_string();
        app.income_form.amount = "".to_string();

        app.submit_income();

        assert!(app.store.income_sources().is_empty());
        assert_eq!(app.input_mode, InputMode::AddIncome);
    }

    #[test]
    fn test_submit_expense_uses_form_selections() {
        let mut app = App::new(BudgetStore::new());
        app.open_expense_form();
        app.expense_form.category = Category::Food;
        app.expense_form.name = "Groceries".to_string();
        app.expense_form.amount = "400".to_string();
        app.expense_form.priority = Priority::High;

        app.submit_expense();

        let expenses = app.store.expenses();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, Category::Food);
        assert_eq!(expenses[0].priority, Priority::High);
    }

    #[test]
    fn test_clear_all_resets_store_and_selection() {
        let mut app = App::new(BudgetStore::new());
        app.store.add_income("Salary", 5000.0).unwrap();
        app.store
            .add_expense(Category::Housing, "Rent", 1500.0, Priority::Critical)
            .unwrap();
        app.expense_table_state.select(Some(0));

        app.clear_all();

        assert!(app.store.is_empty());
        assert_eq!(app.expense_table_state.selected(), None);
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = App::new(BudgetStore::new());
        app.store
            .add_expense(Category::Housing, "Rent", 1500.0, Priority::Critical)
            .unwrap();
        app.store
            .add_expense(Category::Food, "Groceries", 400.0, Priority::High)
            .unwrap();

        app.next_row();
        assert_eq!(app.expense_table_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.expense_table_state.selected(), Some(1));
        app.next_row();
        assert_eq!(app.expense_table_state.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.expense_table_state.selected(), Some(1));
    }

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(1234.5), "$1,234.50");
        assert_eq!(fmt_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(fmt_money(-200.0), "-$200.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 42.50 "), Ok(42.5));
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long expense name", 10), "a very ...");
    }
}
