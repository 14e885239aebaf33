use colored::Colorize;

const LOGO: &[&str] = &[
    r"   ███████╗███╗   ███╗ ██████╗ ███╗   ██╗",
    r"   ╚══███╔╝████╗ ████║██╔═══██╗████╗  ██║",
    r"     ███╔╝ ██╔████╔██║██║   ██║██╔██╗ ██║",
    r"    ███╔╝  ██║╚██╔╝██║██║   ██║██║╚██╗██║",
    r"   ███████╗██║ ╚═╝ ██║╚██████╔╝██║ ╚████║",
    r"   ╚══════╝╚═╝     ╚═╝ ╚═════╝ ╚═╝  ╚═══╝",
];

pub fn print_version_block(version: &str) {
    for line in LOGO {
        println!("{}", line.cyan().bold());
    }
    println!();
    println!("  {} {}", "Version".dimmed(), version.bright_cyan().bold());
    println!("  {} {}", "   Arch".dimmed(), std::env::consts::ARCH.bright_white());
    println!("  {} {}", "     OS".dimmed(), std::env::consts::OS.bright_white());
    println!();
}
