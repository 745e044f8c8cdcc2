use serde::{Deserialize, Serialize};

/// Kind of UI element as printed in a debug dump.
///
/// Unrecognized names resolve to `Other`; the raw line is kept on the node
/// so the original name is never lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Any,
    Other,
    Application,
    Group,
    Window,
    Sheet,
    Drawer,
    Alert,
    Dialog,
    Button,
    RadioButton,
    RadioGroup,
    CheckBox,
    DisclosureTriangle,
    PopUpButton,
    ComboBox,
    MenuButton,
    ToolbarButton,
    Popover,
    Keyboard,
    Key,
    NavigationBar,
    TabBar,
    TabGroup,
    Toolbar,
    StatusBar,
    Table,
    TableRow,
    TableColumn,
    Outline,
    OutlineRow,
    Browser,
    CollectionView,
    Slider,
    PageIndicator,
    ProgressIndicator,
    ActivityIndicator,
    SegmentedControl,
    Picker,
    PickerWheel,
    Switch,
    Toggle,
    Link,
    Image,
    Icon,
    SearchField,
    ScrollView,
    ScrollBar,
    StaticText,
    TextField,
    SecureTextField,
    DatePicker,
    TextView,
    Menu,
    MenuItem,
    MenuBar,
    MenuBarItem,
    Map,
    WebView,
    IncrementArrow,
    DecrementArrow,
    Timeline,
    RatingIndicator,
    ValueIndicator,
    SplitGroup,
    Splitter,
    RelevanceIndicator,
    ColorWell,
    HelpTag,
    Matte,
    DockItem,
    Ruler,
    RulerMarker,
    Grid,
    LevelIndicator,
    Cell,
    LayoutArea,
    LayoutItem,
    Handle,
    Stepper,
    Tab,
    TouchBar,
    StatusItem,
}

/// Dump name for every element type. Both lookup directions use this table.
const TYPE_NAMES: &[(ElementType, &str)] = &[
    (ElementType::Any, "Any"),
    (ElementType::Other, "Other"),
    (ElementType::Application, "Application"),
    (ElementType::Group, "Group"),
    (ElementType::Window, "Window"),
    (ElementType::Sheet, "Sheet"),
    (ElementType::Drawer, "Drawer"),
    (ElementType::Alert, "Alert"),
    (ElementType::Dialog, "Dialog"),
    (ElementType::Button, "Button"),
    (ElementType::RadioButton, "RadioButton"),
    (ElementType::RadioGroup, "RadioGroup"),
    (ElementType::CheckBox, "CheckBox"),
    (ElementType::DisclosureTriangle, "DisclosureTriangle"),
    (ElementType::PopUpButton, "PopUpButton"),
    (ElementType::ComboBox, "ComboBox"),
    (ElementType::MenuButton, "MenuButton"),
    (ElementType::ToolbarButton, "ToolbarButton"),
    (ElementType::Popover, "Popover"),
    (ElementType::Keyboard, "Keyboard"),
    (ElementType::Key, "Key"),
    (ElementType::NavigationBar, "NavigationBar"),
    (ElementType::TabBar, "TabBar"),
    (ElementType::TabGroup, "TabGroup"),
    (ElementType::Toolbar, "Toolbar"),
    (ElementType::StatusBar, "StatusBar"),
    (ElementType::Table, "Table"),
    (ElementType::TableRow, "TableRow"),
    (ElementType::TableColumn, "TableColumn"),
    (ElementType::Outline, "Outline"),
    (ElementType::OutlineRow, "OutlineRow"),
    (ElementType::Browser, "Browser"),
    (ElementType::CollectionView, "CollectionView"),
    (ElementType::Slider, "Slider"),
    (ElementType::PageIndicator, "PageIndicator"),
    (ElementType::ProgressIndicator, "ProgressIndicator"),
    (ElementType::ActivityIndicator, "ActivityIndicator"),
    (ElementType::SegmentedControl, "SegmentedControl"),
    (ElementType::Picker, "Picker"),
    (ElementType::PickerWheel, "PickerWheel"),
    (ElementType::Switch, "Switch"),
    (ElementType::Toggle, "Toggle"),
    (ElementType::Link, "Link"),
    (ElementType::Image, "Image"),
    (ElementType::Icon, "Icon"),
    (ElementType::SearchField, "SearchField"),
    (ElementType::ScrollView, "ScrollView"),
    (ElementType::ScrollBar, "ScrollBar"),
    (ElementType::StaticText, "StaticText"),
    (ElementType::TextField, "TextField"),
    (ElementType::SecureTextField, "SecureTextField"),
    (ElementType::DatePicker, "DatePicker"),
    (ElementType::TextView, "TextView"),
    (ElementType::Menu, "Menu"),
    (ElementType::MenuItem, "MenuItem"),
    (ElementType::MenuBar, "MenuBar"),
    (ElementType::MenuBarItem, "MenuBarItem"),
    (ElementType::Map, "Map"),
    (ElementType::WebView, "WebView"),
    (ElementType::IncrementArrow, "IncrementArrow"),
    (ElementType::DecrementArrow, "DecrementArrow"),
    (ElementType::Timeline, "Timeline"),
    (ElementType::RatingIndicator, "RatingIndicator"),
    (ElementType::ValueIndicator, "ValueIndicator"),
    (ElementType::SplitGroup, "SplitGroup"),
    (ElementType::Splitter, "Splitter"),
    (ElementType::RelevanceIndicator, "RelevanceIndicator"),
    (ElementType::ColorWell, "ColorWell"),
    (ElementType::HelpTag, "HelpTag"),
    (ElementType::Matte, "Matte"),
    (ElementType::DockItem, "DockItem"),
    (ElementType::Ruler, "Ruler"),
    (ElementType::RulerMarker, "RulerMarker"),
    (ElementType::Grid, "Grid"),
    (ElementType::LevelIndicator, "LevelIndicator"),
    (ElementType::Cell, "Cell"),
    (ElementType::LayoutArea, "LayoutArea"),
    (ElementType::LayoutItem, "LayoutItem"),
    (ElementType::Handle, "Handle"),
    (ElementType::Stepper, "Stepper"),
    (ElementType::Tab, "Tab"),
    (ElementType::TouchBar, "TouchBar"),
    (ElementType::StatusItem, "StatusItem"),
];

/// Query collection names that don't follow the lower-camel + "s" rule.
const IRREGULAR_PLURALS: &[(ElementType, &str)] = &[
    (ElementType::Any, "descendants"),
    (ElementType::Other, "otherElements"),
    (ElementType::CheckBox, "checkBoxes"),
    (ElementType::ComboBox, "comboBoxes"),
    (ElementType::Switch, "switches"),
];

impl ElementType {
    /// Resolve a dump type name. Unknown names fall back to `Other`.
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or(ElementType::Other)
    }

    /// Exact lookup without the `Other` fallback.
    pub fn lookup(name: &str) -> Option<Self> {
        TYPE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(t, _)| *t)
    }

    pub fn name(self) -> &'static str {
        TYPE_NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, n)| *n)
            .unwrap_or("Other")
    }

    /// Collection name used in locator paths, e.g. `buttons`, `otherElements`.
    pub fn plural(self) -> String {
        if let Some((_, p)) = IRREGULAR_PLURALS.iter().find(|(t, _)| *t == self) {
            return (*p).to_string();
        }
        pluralize(self.name())
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Default plural rule: lower-case the first letter and append "s".
pub fn pluralize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            out.push('s');
            out
        }
        None => String::new(),
    }
}
