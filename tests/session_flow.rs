//! End-to-end sessions driven through `handle_event`, from a CSV file on disk
//! to a share link.

use std::io::Write;
use std::time::Duration;
use unimatch::domain::{CandidateId, QuizAnswers, Verdict};
use unimatch::export::ShareTarget;
use unimatch::repository::{fetch_or_empty, for_path, CandidateRepository};
use unimatch::ui::Screen;
use unimatch::{handle_event, initialize, Action, AppState, Config, Event, SessionPhase};

const SHEET: &str = "\
NomeEsteso,NomeOperativo,Cidade,Área,Grandes Centros (150k),\"Artística, Literária e Educação\",\"Econômica, Jurídica e Social\",\"iências da Saúde, Agrárias e Veterinária\",STEM,Descrizione
Politecnico di Milano,PoliMi,Milano,Norte,TRUE,FALSE,FALSE,FALSE,TRUE,Referência em tecnologia.
Università di Bologna,UniBo,Bologna,Centro,TRUE,TRUE,TRUE,FALSE,FALSE,A universidade mais antiga do mundo ocidental.
Politecnico di Torino,PoliTo,Torino,Norte,TRUE,FALSE,FALSE,FALSE,TRUE,Engenharia automotiva.
Università di Palermo,,Palermo,Sul e Ilhas,FALSE,FALSE,FALSE,TRUE,FALSE,Fundada em 1806.
";

const FRAME: Duration = Duration::from_millis(16);

fn sheet_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(SHEET.as_bytes()).unwrap();
    file
}

fn config() -> Config {
    Config {
        undo_cooldown_ms: 0,
        ..Config::default()
    }
}

/// Submits the quiz and answers the fetch request from `repository`.
fn start(state: &mut AppState, answers: QuizAnswers, repository: &dyn CandidateRepository) {
    let (_, actions) = handle_event(state, &Event::QuizSubmitted { answers }).unwrap();
    assert!(matches!(actions.as_slice(), [Action::FetchCandidates { .. }]));
    let candidates = fetch_or_empty(repository);
    handle_event(state, &Event::CandidatesLoaded { candidates }).unwrap();
}

fn settle(state: &mut AppState) {
    for _ in 0..500 {
        if !state.is_animating() {
            return;
        }
        handle_event(state, &Event::Tick(FRAME)).unwrap();
    }
    panic!("animations never settled");
}

fn active(state: &AppState) -> CandidateId {
    state.active.as_ref().map(|c| c.card_id().clone()).unwrap()
}

fn swipe(state: &mut AppState, delta: f64) {
    let card_id = active(state);
    handle_event(state, &Event::DragStart { card_id: card_id.clone() }).unwrap();
    handle_event(state, &Event::DragMove { card_id: card_id.clone(), delta }).unwrap();
    handle_event(state, &Event::DragEnd { card_id }).unwrap();
    settle(state);
}

#[test]
fn csv_quiz_filters_to_northern_stem_universities() {
    let file = sheet_file();
    let mut state = initialize(&config());
    let answers = QuizAnswers::default().with("region", "north").with("area", vec!["stem"]);
    start(&mut state, answers, for_path(file.path()).as_ref());

    let deck = state.deck.as_ref().unwrap();
    assert_eq!(deck.total(), 2);
    let names: Vec<&str> = deck.remaining().iter().map(|c| c.candidate.candidate.name.as_str()).collect();
    assert!(names.contains(&"Politecnico di Milano"));
    assert!(names.contains(&"Politecnico di Torino"));
}

#[test]
fn threshold_tie_snaps_back_and_one_more_commits() {
    let file = sheet_file();
    let mut state = initialize(&config());
    start(&mut state, QuizAnswers::default(), for_path(file.path()).as_ref());
    let first = active(&state);

    swipe(&mut state, 100.0);
    assert_eq!(active(&state), first);
    assert_eq!(state.deck.as_ref().unwrap().history().len(), 0);

    swipe(&mut state, 101.0);
    assert_ne!(active(&state), first);
    assert_eq!(state.liked().len(), 1);
}

#[test]
fn full_session_ends_in_a_shareable_shortlist() {
    let file = sheet_file();
    let mut state = initialize(&config());
    let answers = QuizAnswers::default()
        .with("userName", "Giulia")
        .with("userSurname", "Rossi")
        .with("region", "north");
    start(&mut state, answers, for_path(file.path()).as_ref());

    handle_event(&mut state, &Event::Choose(Verdict::Like)).unwrap();
    settle(&mut state);
    handle_event(&mut state, &Event::Choose(Verdict::Reject)).unwrap();
    settle(&mut state);
    assert_eq!(state.phase(), SessionPhase::Shortlist);

    let (_, actions) = handle_event(&mut state, &Event::Share(ShareTarget::Email)).unwrap();
    let [Action::OpenLink { uri }] = actions.as_slice() else {
        panic!("expected a link, got {actions:?}");
    };
    assert!(uri.starts_with("mailto:assessoria@vivendoafundo.com.br?subject="));
    assert!(uri.contains("Giulia%20Rossi"));

    match state.compute_viewmodel().screen {
        Screen::Shortlist(view) => assert_eq!(view.title, "Lista dos Sonhos de Giulia"),
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn rejecting_everything_lands_on_no_matches_and_undo_recovers() {
    let file = sheet_file();
    let mut state = initialize(&config());
    start(
        &mut state,
        QuizAnswers::default().with("region", "south"),
        for_path(file.path()).as_ref(),
    );
    assert_eq!(state.deck.as_ref().unwrap().total(), 1);

    swipe(&mut state, -250.0);
    assert_eq!(state.phase(), SessionPhase::NoMatches);
    let (_, actions) = handle_event(&mut state, &Event::Share(ShareTarget::WhatsApp)).unwrap();
    assert!(actions.is_empty());

    handle_event(&mut state, &Event::Undo).unwrap();
    assert_eq!(state.phase(), SessionPhase::Swiping);
    settle(&mut state);
}

#[test]
fn restart_reenters_the_pipeline() {
    let file = sheet_file();
    let repository = for_path(file.path());
    let mut state = initialize(&config());
    start(&mut state, QuizAnswers::default(), repository.as_ref());
    swipe(&mut state, 300.0);

    handle_event(&mut state, &Event::Restart).unwrap();
    assert_eq!(state.phase(), SessionPhase::Quiz);
    assert!(state.liked().is_empty());

    start(&mut state, QuizAnswers::default().with("citySize", "small"), repository.as_ref());
    assert_eq!(state.deck.as_ref().unwrap().total(), 1);
    assert!(state.deck.as_ref().unwrap().history().is_empty());
}

#[test]
fn missing_data_file_degrades_to_an_empty_deck() {
    let mut state = initialize(&config());
    let repository = for_path(std::path::Path::new("/nonexistent/unis.csv"));
    start(&mut state, QuizAnswers::default(), repository.as_ref());
    assert_eq!(state.phase(), SessionPhase::NoMatches);
}
