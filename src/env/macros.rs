//! Declarative field tables

/// Define a configuration struct together with its field table
///
/// Each field names its environment variable tag after `=>` and may carry a
/// default literal. The struct gets an [`EnvConfig`](crate::env::EnvConfig)
/// implementation listing the fields in declaration order; field types must
/// implement [`EnvValue`](crate::env::EnvValue).
///
/// ```
/// use std::time::Duration;
///
/// envkit::env_config! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct ClientConfig {
///         pub url: String => "URL",
///         pub timeout: Duration => "TIMEOUT" default "1s",
///     }
/// }
///
/// let options = envkit::env::Options::new().with_vars([("URL", "val.com")]);
/// let cfg: ClientConfig = envkit::env::new_config([options]).unwrap();
/// assert_eq!(cfg.url, "val.com");
/// assert_eq!(cfg.timeout, Duration::from_secs(1));
/// ```
#[macro_export]
macro_rules! env_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $tag:literal $(default $default:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::env::EnvConfig for $name {
            fn fields() -> ::std::vec::Vec<$crate::env::Field<Self>> {
                ::std::vec![
                    $(
                        $crate::env::Field::of::<$ty>($tag, |target: &mut Self, raw: &str| {
                            target.$field = <$ty as $crate::env::EnvValue>::from_env_str(raw)?;
                            ::std::result::Result::Ok(())
                        })
                        $(.with_default($default))?
                    ),*
                ]
            }
        }
    };
}
