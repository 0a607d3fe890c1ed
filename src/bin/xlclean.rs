use std::io;

fn main() {
    let _logger = match xlclean::logging::init() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("No se pudo iniciar el registro: {err}");
            None
        }
    };

    let stdin = io::stdin();
    if let Err(err) = xlclean::run(stdin.lock(), io::stdout()) {
        eprintln!("Error al procesar el archivo Excel: {err:#}");
        std::process::exit(1);
    }
}
