use std::io;
use std::sync::Arc;

use career_core::model::{TestResult, display_name_for};
use services::{
    AppServices, Intercept, ListenerRegistry, NavigationGuard, Screen, SessionMachine,
    SessionWorkflow,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// 1-based answer option number.
    Choose(usize),
    Next,
    Back,
    Retry,
    Restart,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Ok(n) = line.parse::<usize>() {
            return Self::Choose(n);
        }
        match line.to_ascii_lowercase().as_str() {
            "" | "n" | "next" | "s" | "start" => Self::Next,
            "b" | "back" => Self::Back,
            "r" | "retry" => Self::Retry,
            "x" | "restart" => Self::Restart,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next input; Ctrl-C counts as a quit request. `None` on end of input.
    async fn next(&mut self) -> io::Result<Option<Input>> {
        tokio::select! {
            line = self.lines.next_line() => Ok(line?.map(|line| Input::parse(&line))),
            signal = tokio::signal::ctrl_c() => {
                signal?;
                println!();
                Ok(Some(Input::Quit))
            }
        }
    }

    async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        println!("{question} [y/N]");
        let answer = self.lines.next_line().await?;
        Ok(answer.is_some_and(|a| matches!(a.trim(), "y" | "Y" | "yes")))
    }
}

/// Interactive test session on stdin/stdout.
pub async fn run_test(services: &AppServices) -> io::Result<()> {
    let registry = Arc::new(ListenerRegistry::new());
    let mut workflow = services.session(registry.clone());
    let mut prompt = Prompt::new();

    loop {
        render(workflow.machine());
        let Some(input) = prompt.next().await? else {
            break;
        };
        debug!(?input, screen = ?workflow.machine().screen(), "input");

        match input {
            Input::Quit => {
                if !registry.is_intercepting(Intercept::ExitPrompt)
                    || prompt.confirm(NavigationGuard::CONFIRM_LEAVE_MESSAGE).await?
                {
                    break;
                }
            }
            Input::Back => {
                let leaving = workflow.machine().current_index() == 0;
                if leaving && registry.is_intercepting(Intercept::BackNavigation) {
                    if prompt.confirm(NavigationGuard::CONFIRM_LEAVE_MESSAGE).await? {
                        workflow.reset();
                    }
                } else {
                    workflow.retreat();
                }
            }
            Input::Restart => {
                if !registry.is_intercepting(Intercept::ExitPrompt)
                    || prompt.confirm(NavigationGuard::CONFIRM_LEAVE_MESSAGE).await?
                {
                    workflow.reset();
                }
            }
            Input::Choose(n) => choose(&mut workflow, n),
            Input::Next => match workflow.machine().screen() {
                Screen::Welcome => {
                    workflow.start().await;
                }
                Screen::Test => {
                    workflow.advance().await;
                }
                Screen::Results => workflow.reset(),
                Screen::Analyzing | Screen::Error => {}
            },
            Input::Retry => {
                workflow.retry().await;
            }
            Input::Unknown(raw) => println!("Unknown command: {raw}"),
        }
    }

    Ok(())
}

fn choose(workflow: &mut SessionWorkflow, n: usize) {
    let option = workflow
        .machine()
        .current_question()
        .and_then(|question| question.answer_options.get(n.wrapping_sub(1)))
        .map(|option| option.id.clone());
    match option {
        Some(id) => {
            workflow.answer(id);
        }
        None => println!("No option {n}."),
    }
}

fn render(machine: &SessionMachine) {
    println!();
    match machine.screen() {
        Screen::Welcome => {
            println!("Career test. Press Enter to start, q to quit.");
        }
        Screen::Test => render_question(machine),
        Screen::Analyzing => println!("Analyzing your answers..."),
        Screen::Results => {
            if let Some(result) = machine.results() {
                print!("{}", format_result(result));
            }
            println!("Press Enter to take the test again, q to quit.");
        }
        Screen::Error => {}
    }

    if let Some(error) = machine.error() {
        println!("! {}: {}", error.title(), error.message());
        println!("  r = {}", error.retry_action());
    }
}

fn render_question(machine: &SessionMachine) {
    let Some(question) = machine.current_question() else {
        return;
    };
    let progress = machine.progress();
    println!(
        "[{}/{}] {}",
        progress.position, progress.total, question.text
    );
    let selected = machine.selected_answer();
    for (i, option) in question.answer_options.iter().enumerate() {
        let marker = if selected == Some(&option.id) { '*' } else { ' ' };
        println!("  {marker} {}. {}", i + 1, option.text);
    }
    let next = if machine.is_last_question() { "finish" } else { "next" };
    println!("number = choose, Enter = {next}, b = back, q = quit");
}

fn format_result(result: &TestResult) -> String {
    let mut out = String::from("Your top roles:\n");
    for (rank, role) in result.roles_by_score().into_iter().take(5).enumerate() {
        out.push_str(&format!(
            "  {}. {} ({:.0}%)\n",
            rank + 1,
            display_name_for(&role.role_id),
            role.score * 100.0
        ));
    }
    if let Some(rec) = &result.stage_recommendation {
        out.push_str(&format!("Where you fit: {}\n", rec.primary_stage_name));
    }
    if let Some(interpretation) = &result.interpretation {
        out.push_str(&format!("{}\n", interpretation.primary_recommendation));
    }
    for warning in result.warnings.iter().flatten() {
        out.push_str(&format!("note: {warning}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_core::model::{RoleId, RoleScore, SessionId};
    use std::collections::BTreeMap;

    #[test]
    fn parses_inputs() {
        assert_eq!(Input::parse(" 2 "), Input::Choose(2));
        assert_eq!(Input::parse(""), Input::Next);
        assert_eq!(Input::parse("B"), Input::Back);
        assert_eq!(Input::parse("retry"), Input::Retry);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse("dance"), Input::Unknown("dance".into()));
    }

    #[test]
    fn result_lists_roles_by_score() {
        let result = TestResult {
            session_id: SessionId::new("s"),
            ranked_roles: vec![
                RoleScore {
                    role_id: RoleId::new("sre"),
                    score: 0.2,
                },
                RoleScore {
                    role_id: RoleId::new("product_manager"),
                    score: 0.9,
                },
            ],
            signal_profile: BTreeMap::new(),
            interpretation: None,
            ranked_stages: None,
            stage_recommendation: None,
            warnings: Some(vec!["few answers".into()]),
        };

        let text = format_result(&result);

        let pm = text.find("product manager (90%)").unwrap();
        let sre = text.find("sre (20%)").unwrap();
        assert!(pm < sre);
        assert!(text.contains("note: few answers"));
    }
}
