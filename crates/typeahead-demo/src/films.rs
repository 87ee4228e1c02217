//! The film catalogue and how films are matched and drawn.

use std::fmt;

use typeahead::filter::Filter;
use typeahead::query_list::{ItemRenderer, ItemRendererProps};
use typeahead::style::{Style, pad_right, truncate, visible_width};

/// One entry of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Film {
    pub rank: u32,
    pub title: &'static str,
    pub year: u16,
}

impl Film {
    const fn new(rank: u32, title: &'static str, year: u16) -> Self {
        Self { rank, title, year }
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({})", self.rank, self.title, self.year)
    }
}

/// The IMDb top 100, in rank order.
pub const TOP_100_FILMS: [Film; 100] = [
    Film::new(1, "The Shawshank Redemption", 1994),
    Film::new(2, "The Godfather", 1972),
    Film::new(3, "The Godfather: Part II", 1974),
    Film::new(4, "The Dark Knight", 2008),
    Film::new(5, "12 Angry Men", 1957),
    Film::new(6, "Schindler's List", 1993),
    Film::new(7, "Pulp Fiction", 1994),
    Film::new(8, "The Lord of the Rings: The Return of the King", 2003),
    Film::new(9, "The Good, the Bad and the Ugly", 1966),
    Film::new(10, "Fight Club", 1999),
    Film::new(11, "The Lord of the Rings: The Fellowship of the Ring", 2001),
    Film::new(12, "Star Wars: Episode V - The Empire Strikes Back", 1980),
    Film::new(13, "Forrest Gump", 1994),
    Film::new(14, "Inception", 2010),
    Film::new(15, "The Lord of the Rings: The Two Towers", 2002),
    Film::new(16, "One Flew Over the Cuckoo's Nest", 1975),
    Film::new(17, "Goodfellas", 1990),
    Film::new(18, "The Matrix", 1999),
    Film::new(19, "Seven Samurai", 1954),
    Film::new(20, "Star Wars: Episode IV - A New Hope", 1977),
    Film::new(21, "City of God", 2002),
    Film::new(22, "Se7en", 1995),
    Film::new(23, "The Silence of the Lambs", 1991),
    Film::new(24, "It's a Wonderful Life", 1946),
    Film::new(25, "Life Is Beautiful", 1997),
    Film::new(26, "The Usual Suspects", 1995),
    Film::new(27, "Léon: The Professional", 1994),
    Film::new(28, "Spirited Away", 2001),
    Film::new(29, "Saving Private Ryan", 1998),
    Film::new(30, "Once Upon a Time in the West", 1968),
    Film::new(31, "American History X", 1998),
    Film::new(32, "Interstellar", 2014),
    Film::new(33, "Casablanca", 1942),
    Film::new(34, "City Lights", 1931),
    Film::new(35, "Psycho", 1960),
    Film::new(36, "The Green Mile", 1999),
    Film::new(37, "The Intouchables", 2011),
    Film::new(38, "Modern Times", 1936),
    Film::new(39, "Raiders of the Lost Ark", 1981),
    Film::new(40, "Rear Window", 1954),
    Film::new(41, "The Pianist", 2002),
    Film::new(42, "The Departed", 2006),
    Film::new(43, "Terminator 2: Judgment Day", 1991),
    Film::new(44, "Back to the Future", 1985),
    Film::new(45, "Whiplash", 2014),
    Film::new(46, "Gladiator", 2000),
    Film::new(47, "Memento", 2000),
    Film::new(48, "The Prestige", 2006),
    Film::new(49, "The Lion King", 1994),
    Film::new(50, "Apocalypse Now", 1979),
    Film::new(51, "Alien", 1979),
    Film::new(52, "Sunset Boulevard", 1950),
    Film::new(
        53,
        "Dr. Strangelove or: How I Learned to Stop Worrying and Love the Bomb",
        1964,
    ),
    Film::new(54, "The Great Dictator", 1940),
    Film::new(55, "Cinema Paradiso", 1988),
    Film::new(56, "The Lives of Others", 2006),
    Film::new(57, "Grave of the Fireflies", 1988),
    Film::new(58, "Paths of Glory", 1957),
    Film::new(59, "Django Unchained", 2012),
    Film::new(60, "The Shining", 1980),
    Film::new(61, "WALL·E", 2008),
    Film::new(62, "American Beauty", 1999),
    Film::new(63, "The Dark Knight Rises", 2012),
    Film::new(64, "Princess Mononoke", 1997),
    Film::new(65, "Aliens", 1986),
    Film::new(66, "Oldboy", 2003),
    Film::new(67, "Once Upon a Time in America", 1984),
    Film::new(68, "Witness for the Prosecution", 1957),
    Film::new(69, "Das Boot", 1981),
    Film::new(70, "Citizen Kane", 1941),
    Film::new(71, "North by Northwest", 1959),
    Film::new(72, "Vertigo", 1958),
    Film::new(73, "Star Wars: Episode VI - Return of the Jedi", 1983),
    Film::new(74, "Reservoir Dogs", 1992),
    Film::new(75, "Braveheart", 1995),
    Film::new(76, "M", 1931),
    Film::new(77, "Requiem for a Dream", 2000),
    Film::new(78, "Amélie", 2001),
    Film::new(79, "A Clockwork Orange", 1971),
    Film::new(80, "Like Stars on Earth", 2007),
    Film::new(81, "Taxi Driver", 1976),
    Film::new(82, "Lawrence of Arabia", 1962),
    Film::new(83, "Double Indemnity", 1944),
    Film::new(84, "Eternal Sunshine of the Spotless Mind", 2004),
    Film::new(85, "Amadeus", 1984),
    Film::new(86, "To Kill a Mockingbird", 1962),
    Film::new(87, "Toy Story 3", 2010),
    Film::new(88, "Logan", 2017),
    Film::new(89, "Full Metal Jacket", 1987),
    Film::new(90, "Dangal", 2016),
    Film::new(91, "The Sting", 1973),
    Film::new(92, "2001: A Space Odyssey", 1968),
    Film::new(93, "Singin' in the Rain", 1952),
    Film::new(94, "Toy Story", 1995),
    Film::new(95, "Bicycle Thieves", 1948),
    Film::new(96, "The Kid", 1921),
    Film::new(97, "Inglourious Basterds", 2009),
    Film::new(98, "Snatch", 2000),
    Film::new(99, "3 Idiots", 2009),
    Film::new(100, "Monty Python and the Holy Grail", 1975),
];

/// Matches the query against `"{position}. {title} {year}"`, ignoring case,
/// so both "godfather" and "1972" find The Godfather.
#[must_use]
pub fn film_filter() -> Filter<Film> {
    Filter::item(|query: &str, film: &Film, index: usize| {
        format!("{}. {} {}", index + 1, film.title.to_lowercase(), film.year)
            .contains(&query.to_lowercase())
    })
}

/// What the input shows for a committed film.
#[must_use]
pub fn film_title(film: &Film) -> String {
    film.title.to_string()
}

/// Draws `"{rank}. {title}"` with the year as a right-aligned label.
#[derive(Debug, Clone)]
pub struct FilmRenderer {
    pub active_marker: String,
    pub text_style: Style,
    pub label_style: Style,
    pub active_style: Style,
}

impl FilmRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_marker: "> ".to_string(),
            text_style: Style::new(),
            label_style: Style::new().foreground("240"),
            active_style: Style::new().foreground("212").bold(),
        }
    }

    /// No colors at all.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            active_marker: "> ".to_string(),
            text_style: Style::new(),
            label_style: Style::new(),
            active_style: Style::new(),
        }
    }
}

impl Default for FilmRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRenderer<Film> for FilmRenderer {
    fn render(&self, props: &ItemRendererProps<'_, Film>) -> String {
        let film = props.item;
        let marker = if props.is_active {
            self.active_marker.clone()
        } else {
            " ".repeat(visible_width(&self.active_marker))
        };
        let text = format!("{}. {}", film.rank, film.title);
        let label = film.year.to_string();

        let fixed = visible_width(&marker) + 1 + label.len();
        let (text, label) = if props.width > fixed {
            let text_width = props.width - fixed;
            (pad_right(&truncate(&text, text_width), text_width), label)
        } else {
            // Too narrow for the label.
            let text_width = props.width.saturating_sub(visible_width(&marker));
            (truncate(&text, text_width), String::new())
        };

        if props.is_active {
            let row = if label.is_empty() {
                format!("{marker}{text}")
            } else {
                format!("{marker}{text} {label}")
            };
            return self.active_style.render(&row);
        }
        let text = self.text_style.render(&format!("{marker}{text}"));
        if label.is_empty() {
            text
        } else {
            format!("{text} {}", self.label_style.render(&label))
        }
    }
}
