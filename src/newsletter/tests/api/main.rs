mod generate;
mod health_check;
mod helpers;
mod image;
mod preferences;
mod preview;
mod style_import;
