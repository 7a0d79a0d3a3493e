use taskboard::error::ErrorCode;
use taskboard::models::{StatusFilter, TaskStatus};
use taskboard::presenter::{ListState, SectionVisibility};
use taskboard::storage::{MemoryStore, STORAGE_KEY};
use taskboard::store::TaskStore;
use taskboard::view::{Intent, Screen, ViewController, ViewState};

fn setup() -> (ViewController, TaskStore<MemoryStore>) {
    (
        ViewController::default(),
        TaskStore::open(MemoryStore::with_value(STORAGE_KEY, "[]")),
    )
}

fn submit_add(title: &str) -> Intent {
    Intent::SubmitAdd {
        title: title.to_string(),
        description: String::new(),
    }
}

#[test]
fn test_initial_state_is_list() {
    let (controller, _) = setup();
    let state = controller.initial();
    assert_eq!(state, ViewState::List(ListState::default()));
    assert_eq!(state.header().title, "TO-DO APP");
    assert!(!state.header().show_back);
}

#[test]
fn test_add_flow() {
    let (controller, mut store) = setup();
    let list = controller.initial();

    let add = controller.dispatch(&list, Intent::NewTask, &mut store).unwrap();
    assert_eq!(add, ViewState::Add);
    assert_eq!(add.header().title, "Add New Task");
    assert!(add.header().show_back);

    let err = controller.dispatch(&add, submit_add("  "), &mut store).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(store.tasks().is_empty());

    let back = controller.dispatch(&add, submit_add("Write tests"), &mut store).unwrap();
    assert!(matches!(back, ViewState::List(_)));
    assert_eq!(store.tasks()[0].title, "Write tests");
}

#[test]
fn test_edit_flow_and_status_change() {
    let (controller, mut store) = setup();
    let task = store.add("Draft", "").unwrap();
    let list = controller.initial();

    let edit = controller
        .dispatch(&list, Intent::EditTask(task.id), &mut store)
        .unwrap();
    assert_eq!(edit.edit_target(), Some(task.id));
    assert_eq!(edit.header().title, "Edit Task");
    assert!(matches!(controller.render(&edit, &store), Screen::EditForm(t) if t.id == task.id));

    let still_edit = controller
        .dispatch(&edit, Intent::ChangeStatus(TaskStatus::InProgress), &mut store)
        .unwrap();
    assert_eq!(still_edit, edit);
    assert_eq!(store.get(task.id).unwrap().status, TaskStatus::InProgress);

    let done = controller
        .dispatch(
            &still_edit,
            Intent::SubmitEdit {
                title: "Final".into(),
                description: Some("ready".into()),
            },
            &mut store,
        )
        .unwrap();
    assert_eq!(done.edit_target(), None);
    let updated = store.get(task.id).unwrap();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[test]
fn test_submit_edit_without_description_keeps_current() {
    let (controller, mut store) = setup();
    let task = store.add("Draft", "notes").unwrap();
    let edit = ViewState::Edit { task_id: task.id };

    controller
        .dispatch(
            &edit,
            Intent::SubmitEdit {
                title: "Renamed".into(),
                description: None,
            },
            &mut store,
        )
        .unwrap();
    let updated = store.get(task.id).unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, "notes");
}

#[test]
fn test_cancel_returns_to_list_and_clears_target() {
    let (controller, mut store) = setup();
    let task = store.add("Draft", "").unwrap();

    for state in [ViewState::Add, ViewState::Edit { task_id: task.id }] {
        let next = controller.dispatch(&state, Intent::Cancel, &mut store).unwrap();
        assert_eq!(next, ViewState::List(ListState::default()));
        assert_eq!(next.edit_target(), None);
    }
    assert_eq!(store.get(task.id).unwrap().title, "Draft");
}

#[test]
fn test_missing_edit_target_renders_not_found() {
    let (controller, mut store) = setup();
    let task = store.add("Short lived", "").unwrap();
    let edit = ViewState::Edit { task_id: task.id };
    store.remove(task.id);

    assert!(matches!(
        controller.render(&edit, &store),
        Screen::NotFound { task_id } if task_id == task.id
    ));
    let err = controller
        .dispatch(
            &edit,
            Intent::SubmitEdit {
                title: "x".into(),
                description: None,
            },
            &mut store,
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TaskNotFound);

    let list = controller.dispatch(&edit, Intent::Cancel, &mut store).unwrap();
    assert!(matches!(controller.render(&list, &store), Screen::List(_)));
}

#[test]
fn test_list_toggles_reset_after_leaving_list() {
    let (controller, mut store) = setup();
    let list = controller.initial();
    let list = controller
        .dispatch(&list, Intent::Search("milk".into()), &mut store)
        .unwrap();
    let list = controller
        .dispatch(
            &list,
            Intent::Filter(StatusFilter::Only(TaskStatus::Pending)),
            &mut store,
        )
        .unwrap();
    let list = controller
        .dispatch(&list, Intent::ToggleSection(TaskStatus::Completed), &mut store)
        .unwrap();
    match &list {
        ViewState::List(state) => {
            assert_eq!(state.search, "milk");
            assert_eq!(state.filter, StatusFilter::Only(TaskStatus::Pending));
            assert!(state.sections.completed);
        }
        other => panic!("expected list, got {other:?}"),
    }

    let add = controller.dispatch(&list, Intent::NewTask, &mut store).unwrap();
    let back = controller.dispatch(&add, Intent::Cancel, &mut store).unwrap();
    assert_eq!(back, controller.initial());
}

#[test]
fn test_intents_outside_their_screen_are_rejected() {
    let (controller, mut store) = setup();
    let list = controller.initial();

    let err = controller
        .dispatch(&list, submit_add("Sneaky"), &mut store)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidIntent);
    assert!(store.tasks().is_empty());

    let err = controller
        .dispatch(&ViewState::Add, Intent::DeleteTask(1), &mut store)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidIntent);
}

#[test]
fn test_delete_from_list_keeps_toggles() {
    let (controller, mut store) = setup();
    let task = store.add("Gone", "").unwrap();
    let list = controller
        .dispatch(&controller.initial(), Intent::Search("g".into()), &mut store)
        .unwrap();

    let after = controller
        .dispatch(&list, Intent::DeleteTask(task.id), &mut store)
        .unwrap();
    assert_eq!(after, list);
    assert!(store.tasks().is_empty());

    // deleting again is harmless
    let again = controller
        .dispatch(&after, Intent::DeleteTask(task.id), &mut store)
        .unwrap();
    assert_eq!(again, list);
}

#[test]
fn test_end_to_end_scenario() {
    let controller = ViewController::new(SectionVisibility::all_expanded());
    let mut store = TaskStore::open(MemoryStore::with_value(STORAGE_KEY, "[]"));
    let mut state = controller.initial();

    for title in ["A", "B"] {
        state = controller.dispatch(&state, Intent::NewTask, &mut store).unwrap();
        state = controller.dispatch(&state, submit_add(title), &mut store).unwrap();
    }
    let order: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(order, ["B", "A"]);
    assert!(store.tasks().iter().all(|t| t.status == TaskStatus::Pending));

    let a_id = store.tasks()[1].id;
    state = controller.dispatch(&state, Intent::EditTask(a_id), &mut store).unwrap();
    state = controller
        .dispatch(&state, Intent::ChangeStatus(TaskStatus::Completed), &mut store)
        .unwrap();
    state = controller.dispatch(&state, Intent::Cancel, &mut store).unwrap();

    let Screen::List(view) = controller.render(&state, &store) else {
        panic!("expected list screen");
    };
    let names = |status: TaskStatus| -> Vec<String> {
        view.section(status)
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect()
    };
    assert_eq!(names(TaskStatus::Completed), ["A"]);
    assert_eq!(names(TaskStatus::Pending), ["B"]);
    assert!(names(TaskStatus::InProgress).is_empty());
}
