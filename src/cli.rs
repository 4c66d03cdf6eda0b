use clap::{crate_description, crate_version, value_t_or_exit, App, AppSettings, Arg, ArgMatches, SubCommand};
use std::net::Ipv4Addr;

use lurch::server::{ConfigError, LaunchRef, ServerConfig, ServerOptions};

pub fn get_app() -> App<'static, 'static> {
    App::new("lurch")
        .version(crate_version!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("show")
                .about("print the network byte order address record derived from the given parameters")
                .args(&endpoint_args())
                .arg(
                    Arg::with_name("unchecked")
                        .long("unchecked")
                        .help("skip parameter validation and pack whatever was given"),
                ),
        )
        .subcommand(
            SubCommand::with_name("listen")
                .about("open a listening tcp socket for the given parameters and wait for ctrl-c")
                .args(&endpoint_args()),
        )
}

fn endpoint_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("domain")
            .long("domain")
            .takes_value(true)
            .default_value("2")
            .help("address family number (2 = AF_INET)"),
        Arg::with_name("service")
            .long("service")
            .takes_value(true)
            .default_value("1")
            .help("socket type number (1 = SOCK_STREAM, 2 = SOCK_DGRAM)"),
        Arg::with_name("protocol")
            .long("protocol")
            .takes_value(true)
            .default_value("0")
            .help("protocol number (0 = default for the socket type)"),
        Arg::with_name("interface")
            .short("i")
            .long("interface")
            .takes_value(true)
            .default_value("127.0.0.1")
            .help("IPv4 address of the interface to bind to"),
        Arg::with_name("port")
            .short("p")
            .long("port")
            .takes_value(true)
            .default_value("1234")
            .help("port to bind to"),
        Arg::with_name("backlog")
            .long("backlog")
            .takes_value(true)
            .default_value("128")
            .help("maximum number of pending connections"),
    ]
}

/// Collect the endpoint arguments of a subcommand into [`ServerOptions`], exiting on unparsable input
pub fn get_options(matches: &ArgMatches<'_>) -> ServerOptions {
    ServerOptions::default()
        .domain(value_t_or_exit!(matches, "domain", i32))
        .service(value_t_or_exit!(matches, "service", i32))
        .protocol(value_t_or_exit!(matches, "protocol", i32))
        .interface(u32::from(value_t_or_exit!(matches, "interface", Ipv4Addr)))
        .port(value_t_or_exit!(matches, "port", i32))
        .backlog(value_t_or_exit!(matches, "backlog", i32))
}

/// Build the config for a subcommand, bypassing validation when `--unchecked` was given
pub fn get_config(matches: &ArgMatches<'_>, launch: LaunchRef) -> Result<ServerConfig, ConfigError> {
    let options = get_options(matches);
    if matches.is_present("unchecked") {
        Ok(ServerConfig::new(
            options.domain,
            options.service,
            options.protocol,
            options.interface,
            options.port,
            options.backlog,
            launch,
        ))
    } else {
        options.build(launch)
    }
}
