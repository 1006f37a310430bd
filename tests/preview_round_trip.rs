//! Preview Round-Trip Tests
//!
//! Tests for the builder -> schema -> preview -> builder path:
//! - a rendered schema hands back an equal schema
//! - reopening the preview schema in the builder and regenerating
//!   reproduces it
//! - the stored schema survives the workspace unchanged

use formsmith::builder::BuilderState;
use formsmith::preview::{Control, FieldValue, FormResponse, FormView};
use formsmith::schema::prepare;
use formsmith::store::{StoredSchema, Workspace};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn booking_state() -> BuilderState {
    let mut state = BuilderState::new();
    state.set_form_name(" Booking ");
    state.set_form_description("Front desk intake");
    state.set_account_id("4");

    let guest = state.add_section();
    state.rename_section(guest, "Guest").unwrap();
    let name = state.add_field(guest).unwrap();
    state.rename_field(guest, name, "Full Name").unwrap();
    let photo = state.add_field(guest).unwrap();
    state.rename_field(guest, photo, "Photo").unwrap();
    state.set_field_type(guest, photo, "image").unwrap();
    state.choose_option(guest, photo, "url").unwrap();
    state.set_field_required(guest, name, true).unwrap();

    let stay = state.add_section();
    state.rename_section(stay, "Stay").unwrap();
    state.set_section_status(stay, "3").unwrap();
    let room = state.add_field(stay).unwrap();
    state.rename_field(stay, room, "Room").unwrap();
    state.set_field_type(stay, room, "select").unwrap();
    state.set_custom_options(stay, room, "Single, Double ,,Suite").unwrap();
    let extras = state.add_field(stay).unwrap();
    state.rename_field(stay, extras, "Extras").unwrap();
    state.set_field_type(stay, extras, "checkbox").unwrap();
    state.set_custom_options(stay, extras, "Breakfast,Parking").unwrap();
    let arrival = state.add_field(stay).unwrap();
    state.rename_field(stay, arrival, "Arrival").unwrap();
    state.set_field_type(stay, arrival, "date").unwrap();

    state
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_preview_reproduces_schema() {
    let schema = prepare(&booking_state()).unwrap();
    let view = FormView::from_schema(&schema).unwrap();
    assert_eq!(view.schema(), &schema);

    let reopened = prepare(&BuilderState::from_schema(view.schema())).unwrap();
    assert_eq!(reopened, schema);
}

#[test]
fn test_round_trip_through_workspace() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = Workspace::new(temp_dir.path());

    let schema = prepare(&booking_state()).unwrap();
    workspace
        .save_current_schema(&StoredSchema::new(schema.clone(), None))
        .unwrap();

    let stored = workspace.load_current_schema().unwrap().unwrap();
    let view = FormView::from_schema(&stored.schema).unwrap();
    assert_eq!(view.schema(), &schema);
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_rendered_controls() {
    let schema = prepare(&booking_state()).unwrap();
    let view = FormView::from_schema(&schema).unwrap();

    assert_eq!(view.title, "Booking");
    assert_eq!(view.description.as_deref(), Some("Front desk intake"));

    let photo = &view.sections[0].fields[1];
    assert_eq!(photo.control, Control::ImageInput { placeholder: "Enter url".into() });

    let room = &view.sections[1].fields[0];
    assert_eq!(
        room.control,
        Control::Select { options: vec!["Single".into(), "Double".into(), "Suite".into()] }
    );
    assert_eq!(room.field_id, 3);
}

#[test]
fn test_filled_submission() {
    let schema = prepare(&booking_state()).unwrap();
    let view = FormView::from_schema(&schema).unwrap();

    let mut response = FormResponse::new();
    assert_eq!(response.missing_required(&view), vec!["Guest / Full Name"]);

    response.set_text(&view, 0, "Full Name", "Ada Lovelace").unwrap();
    response.select(&view, 1, "Room", "Suite").unwrap();
    response.toggle_checkbox(&view, 1, "Extras", "Parking", true).unwrap();
    assert!(response.missing_required(&view).is_empty());

    let submission = view.submission(&response);
    assert_eq!(submission.form_name, "Booking");
    assert_eq!(submission.account_id, 4);
    let stay = &submission.template[1];
    assert_eq!(stay.fields[0].value, Some(FieldValue::Text("Suite".into())));
    assert_eq!(
        stay.fields[1].value,
        Some(FieldValue::Choices(vec!["Parking".into()]))
    );
    assert_eq!(stay.fields[2].value, None);
}
