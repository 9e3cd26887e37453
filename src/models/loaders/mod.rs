pub mod pdf_loader;
