use libadwaita as adw;
use adw::prelude::*;
use adw::Application;
use bmi_core::{
    report, BmiResult, Calculator, Category, Config, Error, FormInput, HeightUnit, WeightUnit, ABOUT_TEXT,
};
use gtk::prelude::{BoxExt, ButtonExt, EditableExt, WidgetExt};
use gtk4 as gtk;
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::Level;

const APP_ID: &str = "com.bmicalc.Calculator";

const INSTRUCTIONS: &str = "Enter your height and weight to calculate your BMI.";

struct FormState {
    config: Config,
    calculator: Calculator,
    // Native dialogs are not kept alive by GTK while they are shown
    save_dialog: Option<gtk::FileChooserNative>,
}

struct FormWidgets {
    window: adw::ApplicationWindow,
    height_entry: gtk::Entry,
    height_unit: gtk::DropDown,
    weight_entry: gtk::Entry,
    weight_unit: gtk::DropDown,
    bmi_label: gtk::Label,
    category_label: gtk::Label,
    name_entry: gtk::Entry,
}

fn init_logging() {
    let log_path = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bmi-calc")
        .join("bmi_gui.log");

    let _ = std::fs::create_dir_all(log_path.parent().unwrap_or_else(|| Path::new(".")));

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(move || -> Box<dyn Write + Send> {
            match std::fs::File::options()
                .create(true)
                .append(true)
                .open(&log_path)
            {
                Ok(f) => Box::new(f),
                Err(_) => Box::new(std::io::stderr()),
            }
        })
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> glib::ExitCode {
    init_logging();

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_startup(|_| load_css());
    app.connect_activate(build_window);

    app.run()
}

fn category_css_class(category: Category) -> String {
    format!("bmi-{}", category.color_tag())
}

fn load_css() {
    let mut css = String::from("label.bmi-category { padding: 4px 12px; min-width: 160px; }\n");
    for category in Category::ALL {
        css.push_str(&format!(
            "label.{} {{ background-color: {}; }}\n",
            category_css_class(category),
            category.color_tag()
        ));
    }

    let provider = gtk::CssProvider::new();
    provider.load_from_data(&css);

    match gtk::gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => tracing::warn!("No display available, category colors disabled"),
    }
}

fn build_window(app: &Application) {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load config: {}; using defaults", err);
            Config::default()
        }
    };

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .default_width(400)
        .default_height(520)
        .title("BMI Calculator")
        .build();
    window.set_size_request(400, 400);

    let outer = gtk::Box::new(gtk::Orientation::Vertical, 0);
    outer.append(&build_header_bar(&window));

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(24);
    content.set_margin_end(24);
    outer.append(&content);
    window.set_content(Some(&outer));

    let instructions = gtk::Label::new(Some(INSTRUCTIONS));
    instructions.set_wrap(true);
    instructions.set_margin_bottom(6);
    content.append(&instructions);

    let height_entry = labeled_entry(&content, "Height:");
    let height_unit = gtk::DropDown::from_strings(&HeightUnit::ALL.map(|u| u.tag()));
    height_unit.set_selected(unit_position(&HeightUnit::ALL, config.units.height));
    height_unit.set_halign(gtk::Align::Center);
    content.append(&height_unit);

    let weight_entry = labeled_entry(&content, "Weight:");
    let weight_unit = gtk::DropDown::from_strings(&WeightUnit::ALL.map(|u| u.tag()));
    weight_unit.set_selected(unit_position(&WeightUnit::ALL, config.units.weight));
    weight_unit.set_halign(gtk::Align::Center);
    content.append(&weight_unit);

    let calculate = gtk::Button::with_label("Calculate BMI");
    calculate.set_halign(gtk::Align::Center);
    calculate.set_margin_top(6);
    calculate.add_css_class("suggested-action");
    content.append(&calculate);

    let bmi_label = gtk::Label::new(Some("BMI: "));
    bmi_label.set_margin_top(6);
    content.append(&bmi_label);

    let category_label = gtk::Label::new(Some("Category: "));
    category_label.add_css_class("bmi-category");
    category_label.set_halign(gtk::Align::Center);
    content.append(&category_label);

    let name_entry = labeled_entry(&content, "Name:");
    name_entry.set_placeholder_text(Some("Name written to the saved report"));

    let save = gtk::Button::with_label("Save Results");
    save.set_halign(gtk::Align::Center);
    save.set_margin_top(6);
    content.append(&save);

    let state = Rc::new(RefCell::new(FormState {
        config,
        calculator: Calculator::new(),
        save_dialog: None,
    }));

    let widgets = Rc::new(FormWidgets {
        window: window.clone(),
        height_entry,
        height_unit,
        weight_entry,
        weight_unit,
        bmi_label,
        category_label,
        name_entry,
    });

    {
        let state = state.clone();
        let widgets = widgets.clone();
        calculate.connect_clicked(move |_| on_calculate(&state, &widgets));
    }

    {
        let state = state.clone();
        let widgets = widgets.clone();
        let weight_entry = widgets.weight_entry.clone();
        // Enter in the weight field behaves like the button
        weight_entry.connect_activate(move |_| on_calculate(&state, &widgets));
    }

    {
        let state = state.clone();
        let widgets = widgets.clone();
        save.connect_clicked(move |_| on_save(&state, &widgets));
    }

    window.present();
}

fn build_header_bar(window: &adw::ApplicationWindow) -> adw::HeaderBar {
    let help = gio::Menu::new();
    help.append(Some("About"), Some("win.about"));

    let menu = gio::Menu::new();
    menu.append_submenu(Some("Help"), &help);

    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .build();

    let about = gio::SimpleAction::new("about", None);
    {
        let window = window.clone();
        about.connect_activate(move |_, _| {
            show_message(&window, gtk::MessageType::Info, "About", ABOUT_TEXT);
        });
    }
    window.add_action(&about);

    let header = adw::HeaderBar::new();
    header.pack_end(&menu_button);
    header
}

fn labeled_entry(container: &gtk::Box, label: &str) -> gtk::Entry {
    let label = gtk::Label::new(Some(label));
    label.set_margin_top(4);
    container.append(&label);

    let entry = gtk::Entry::new();
    entry.set_halign(gtk::Align::Center);
    entry.set_width_chars(20);
    container.append(&entry);
    entry
}

fn unit_position<T: PartialEq>(all: &[T], selected: T) -> u32 {
    all.iter().position(|u| *u == selected).unwrap_or(0) as u32
}

/// Snapshot the form fields into a value the calculator can evaluate
fn read_form(widgets: &FormWidgets) -> FormInput {
    let height_unit = HeightUnit::ALL
        .get(widgets.height_unit.selected() as usize)
        .copied()
        .unwrap_or_default();
    let weight_unit = WeightUnit::ALL
        .get(widgets.weight_unit.selected() as usize)
        .copied()
        .unwrap_or_default();

    FormInput::new(
        widgets.height_entry.text().to_string(),
        widgets.weight_entry.text().to_string(),
        height_unit,
        weight_unit,
    )
}

fn on_calculate(state: &Rc<RefCell<FormState>>, widgets: &FormWidgets) {
    let input = read_form(widgets);
    let outcome = state.borrow_mut().calculator.calculate(&input);

    match outcome {
        Ok(result) => render_result(widgets, &result),
        Err(err) => {
            tracing::warn!("Calculation rejected: {}", err);
            show_error(&widgets.window, &err);
        }
    }
}

fn render_result(widgets: &FormWidgets, result: &BmiResult) {
    widgets.bmi_label.set_text(&result.bmi_label());
    widgets.category_label.set_text(&result.category_label());

    for category in Category::ALL {
        widgets
            .category_label
            .remove_css_class(&category_css_class(category));
    }
    widgets
        .category_label
        .add_css_class(&category_css_class(result.category));
}

fn on_save(state: &Rc<RefCell<FormState>>, widgets: &FormWidgets) {
    if state.borrow().calculator.last().is_none() {
        show_error(&widgets.window, &Error::NoResultToSave);
        return;
    }

    let dialog = gtk::FileChooserNative::new(
        Some("Save Results"),
        Some(&widgets.window),
        gtk::FileChooserAction::Save,
        Some("_Save"),
        Some("_Cancel"),
    );
    dialog.set_modal(true);

    let text_filter = gtk::FileFilter::new();
    text_filter.set_name(Some("Text files"));
    text_filter.add_pattern("*.txt");
    dialog.add_filter(&text_filter);

    let all_filter = gtk::FileFilter::new();
    all_filter.set_name(Some("All files"));
    all_filter.add_pattern("*");
    dialog.add_filter(&all_filter);

    {
        let state = state.borrow();
        dialog.set_current_name(&state.config.output.file_name);
        let folder = gio::File::for_path(&state.config.output.directory);
        if let Err(err) = dialog.set_current_folder(Some(&folder)) {
            tracing::debug!("Could not preselect output directory: {}", err);
        }
    }

    let name = widgets.name_entry.text().to_string();
    let window = widgets.window.clone();
    let response_state = state.clone();
    dialog.connect_response(move |dialog, response| {
        let mut state = response_state.borrow_mut();
        state.save_dialog = None;

        if response != gtk::ResponseType::Accept {
            return;
        }

        let Some(chosen) = dialog.file().and_then(|file| file.path()) else {
            tracing::warn!("Save dialog returned no local path");
            return;
        };

        // The native dialog only confirmed replacing the path the user typed
        let (path, extension_added) = report::with_default_extension(chosen);
        match state.calculator.save(&name, &path, !extension_added) {
            Ok(()) => show_message(
                &window,
                gtk::MessageType::Info,
                "Saved",
                "Results saved successfully.",
            ),
            Err(err) => {
                tracing::error!("Failed to save results to {:?}: {}", path, err);
                show_error(&window, &err);
            }
        }
    });

    dialog.show();
    state.borrow_mut().save_dialog = Some(dialog);
}

fn show_error(parent: &adw::ApplicationWindow, err: &Error) {
    show_message(parent, gtk::MessageType::Error, err.title(), &err.to_string());
}

fn show_message(
    parent: &adw::ApplicationWindow,
    kind: gtk::MessageType,
    title: &str,
    message: &str,
) {
    let dialog = gtk::MessageDialog::builder()
        .transient_for(parent)
        .modal(true)
        .message_type(kind)
        .buttons(gtk::ButtonsType::Ok)
        .text(title)
        .secondary_text(message)
        .build();
    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}
