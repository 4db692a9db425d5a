use console::Style;

pub fn info() -> Style {
    Style::new().dim()
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow()
}

pub fn error() -> Style {
    Style::new().red()
}

pub fn heading() -> Style {
    Style::new().bold()
}

pub fn type_name() -> Style {
    Style::new().cyan()
}

pub fn flag() -> Style {
    Style::new().yellow().italic()
}
