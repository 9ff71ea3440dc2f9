//! Demo address book, loaded into an empty store with `--seed`.

use rolodex_core::Contact;

/// (name, phone number, email, relationship)
pub const DEMO_CONTACTS: &[(&str, &str, &str, &str)] = &[
    ("Kimberlee Turlington", "039 298-72-30", "abc@gmail.com", "friend"),
    ("Miguel Eveland", "032-2659094", "abc@mail.com", "friend"),
    ("Audrie Smid", "03758295-10 32", "abc@mail.com", "friend"),
    ("Antonia Maslanka", "00594-83-34 93", "abc@mail.com", "friend"),
    ("Val Hoffmeyer", "001-859-07-84", "abc@mail.com", "friend"),
    ("Fleta Mckiney", "046-30-01-80", "abc@mail.com", "friend"),
    ("Leanna Wedel", "0184 425384", "abc@mail.com", "friend"),
    ("Reva Larger", "0262-2875", "abc@mail.com", "friend"),
    ("Shelby Prator", "0174-1599", "abc@mail.com", "friend"),
    ("Micheal Veronesi", "09564 310-6 4", "abc@mail.com", "friend"),
    ("Tyrone Hopton", "00718 04608-5", "abc@mail.com", "friend"),
    ("Cheri Batson", "06243158218-21", "abc@mail.com", "friend"),
    ("Sol Stockfisch", "092409-2 75", "abc@mail.com", "friend"),
    ("Briana Angry", "04893-326-429", "abc@mail.com", "friend"),
    ("Elfreda Capron", "02091941 2138", "abc@mail.com", "friend"),
    ("Hannah Perloff", "089721 796 492", "abc@mail.com", "friend"),
    ("Chanell Neidlinger", "01596 197 34-92", "abc@mail.com", "friend"),
    ("Shaniqua Khan", "09376715-52 9", "abc@mail.com", "friend"),
    ("Stewart Lenzo", "06251 96-5-75", "abc@mail.com", "friend"),
    ("Rosalina Merthie", "035490 054 8442", "abc@mail.com", "friend"),
    ("Cher Griswould", "026-67-976", "abc@mail.com", "friend"),
    ("Sonia Otsuka", "004 20903 95", "abc@mail.com", "friend"),
    ("Benny Graden", "05263 82461-31", "abc@mail.com", "friend"),
    ("Cyrus Balius", "0089-57289-0", "abc@mail.com", "friend"),
    ("Shanon Kueny", "071 20 30 2", "abc@mail.com", "friend"),
    ("Walton Svoboda", "089 203-58 03", "abc@mail.com", "friend"),
    ("Daron Gardocki", "0351 560-753", "abc@mail.com", "friend"),
    ("Stephine Daum", "06831402897-92", "abc@mail.com", "friend"),
    ("Alva Sauvageau", "045-5177 0", "abc@mail.com", "friend"),
    ("Silas Scarth", "053618 0370517", "abc@mail.com", "friend"),
    ("Diego Schaefer", "056872 42-25", "abc@mail.com", "friend"),
    ("Shenita Broxterman", "0796-92 7309", "abc@mail.com", "friend"),
    ("Lucas Trischitta", "0853-17-7-6", "abc@mail.com", "friend"),
    ("Felisa Burmeister", "0702-0676 82", "abc@mail.com", "friend"),
    ("Latricia Fickas", "049356 527-27-69", "abc@mail.com", "friend"),
    ("Usha Horsely", "039-70-40 60", "abc@mail.com", "friend"),
    ("Augustine Crosswell", "0305 20439-38", "abc@mail.com", "friend"),
    ("Kandis Netherland", "006978 15 1821", "abc@mail.com", "friend"),
    ("Emile Steenburg", "0208 04506", "abc@mail.com", "friend"),
    ("Tomi Minasian", "0049 6316259", "abc@mail.com", "friend"),
    ("Rusty Biafore", "021069 46 5834", "abc@mail.com", "friend"),
    ("Art Esperanza", "095438918516", "abc@mail.com", "friend"),
    ("Keneth Sigg", "0235038 8692", "abc@mail.com", "friend"),
    ("Gilda Wilbers", "02765 5127872", "abc@mail.com", "friend"),
    ("Marhta Genther", "0830294174 0", "abc@mail.com", "friend"),
    ("Vicente Perko", "042 542 89 21", "abc@mail.com", "friend"),
    ("Amalia Velie", "0233050 4", "abc@mail.com", "friend"),
    ("Bruno Feeley", "062375-068-52 89", "abc@mail.com", "friend"),
    ("Frankie Mires", "0351 17-40 41", "abc@mail.com", "friend"),
    ("Samual Plattsmier", "059-175 871", "abc@mail.com", "friend"),
    ("Alejandro Forquer", "04 079-50 17", "abc@mail.com", "friend"),
    ("Isaac Beauchemin", "03506038-52-3", "abc@mail.com", "friend"),
    ("Ashley Mckellan", "090 8468-1", "abc@mail.com", "friend"),
    ("Jolie Kiflezghie", "021-617-69-72", "abc@mail.com", "friend"),
    ("Marna Pullom", "009842517 8 1", "abc@mail.com", "friend"),
    ("Chong Kudrick", "021-742 25 59", "abc@mail.com", "friend"),
    ("Jamison Severs", "085-031-4296", "abc@mail.com", "friend"),
    ("Griselda Levels", "03045-193 97-61", "abc@mail.com", "friend"),
    ("Norah Gildow", "0246-24-2-17", "abc@mail.com", "friend"),
    ("Renda Houskeeper", "0293-06 1", "abc@mail.com", "friend"),
    ("Roselee Gwynn", "025368 084-985", "abc@mail.com", "friend"),
    ("Francesco Pera", "076019 168 24-53", "abc@mail.com", "friend"),
    ("Janelle Gadberry", "030947-48235 46", "abc@mail.com", "friend"),
    ("Riva Richner", "070336 25-02", "abc@mail.com", "friend"),
    ("Annamarie Devendorf", "068-631-47", "abc@mail.com", "friend"),
    ("Marty Robinson", "0596-14 16 24", "abc@mail.com", "friend"),
    ("Glen Raybourn", "040720417 13", "abc@mail.com", "friend"),
    ("Candance Lynds", "03928 0419690", "abc@mail.com", "friend"),
    ("Houston Ezparza", "08073-29 0832", "abc@mail.com", "friend"),
    ("Arnoldo Galamay", "0093486 71-1", "abc@mail.com", "friend"),
    ("Lashonda Weidman", "0342 156-5 90", "abc@mail.com", "friend"),
    ("Hershel Defilippo", "04671037-0180", "abc@mail.com", "friend"),
    ("Bruno Vue", "020 1763 14", "abc@mail.com", "friend"),
    ("Leslee Emge", "0584 081 8 49", "abc@mail.com", "friend"),
    ("Leon Mondy", "04265 804-06-60", "abc@mail.com", "friend"),
    ("Charlie Medel", "01-476 20 60", "abc@mail.com", "friend"),
    ("Donnette Lashbrook", "0514 806", "abc@mail.com", "friend"),
    ("Alvaro Colfer", "047535660 48", "abc@mail.com", "friend"),
    ("Letisha Reindel", "013 04679-69", "abc@mail.com", "friend"),
    ("Jake Quinney", "01082 7831669", "abc@mail.com", "friend"),
    ("Gayle Avans", "029-326 90-62", "abc@mail.com", "friend"),
    ("Jeffery Hansbrough", "024 613-28 89", "abc@mail.com", "friend"),
    ("Lenny Redenbaugh", "034203 398", "abc@mail.com", "friend"),
    ("Jude Alvey", "096582241-8372", "abc@mail.com", "friend"),
    ("Minh Dionisio", "0475349 24 27", "abc@mail.com", "friend"),
    ("Huey Twedell", "0507-197-0", "abc@mail.com", "friend"),
    ("Jacquie Burbach", "0326-58-09 0", "abc@mail.com", "friend"),
    ("Orpha Geiss", "02380875348", "abc@mail.com", "friend"),
    ("Denese Escovedo", "065 709-86", "abc@mail.com", "friend"),
    ("Demarcus Dittrich", "048-0795635", "abc@mail.com", "friend"),
    ("Maximo Micco", "06243-39 32 98", "abc@mail.com", "friend"),
    ("Jc Zilnicki", "008975 735 2 08", "abc@mail.com", "friend"),
    ("Britt Savin", "001-5813 0", "abc@mail.com", "friend"),
    ("Pasty Garbett", "07049 16 41", "abc@mail.com", "friend"),
    ("Ernie Hegan", "027 249-84-12", "abc@mail.com", "friend"),
    ("Rolland Halsey", "093 284 1 45", "abc@mail.com", "friend"),
    ("Stevie Strebeck", "01306 963 93-60", "abc@mail.com", "friend"),
    ("Marylin Applegate", "09412 572 92-58", "abc@mail.com", "friend"),
    ("Stacia Kelleher", "001969147523", "abc@mail.com", "friend"),
    ("Khadijah Rouleau", "08596 470 6781", "abc@mail.com", "friend"),
    ("Lincoln Orantes", "01276645-83 91", "abc@mail.com", "friend"),
    ("Lindsey Vanvleck", "0547-54023-17", "abc@mail.com", "friend"),
    ("Tommie Diviney", "098357 184", "abc@mail.com", "friend"),
    ("Domenic Schwiebert", "026017054 1 79", "abc@mail.com", "friend"),
    ("Novella Sniezek", "0550682 06", "abc@mail.com", "friend"),
    ("Veronika Maisonet", "040 645 07 28", "abc@mail.com", "friend"),
    ("Nicky Schulweis", "034791-975 3739", "abc@mail.com", "friend"),
    ("Eileen Spearin", "04236576-19-3", "abc@mail.com", "friend"),
    ("Warner Cotty", "046981-187387", "abc@mail.com", "friend"),
    ("Gita Hogle", "035 54-61 07", "abc@mail.com", "friend"),
    ("Isa Debiasio", "089869-67-34", "abc@mail.com", "friend"),
    ("Manie Colafrancesco", "042955475", "abc@mail.com", "friend"),
    ("Kraig Millsap", "0647-94-36-43", "abc@mail.com", "friend"),
    ("Armando Nass", "09612 03 2395", "abc@mail.com", "friend"),
    ("Lou Mou", "0682 037-191", "abc@mail.com", "friend"),
    ("Erwin Halferty", "0742-509 53 41", "abc@mail.com", "friend"),
    ("Desmond Ruano", "0845926-37 39", "abc@mail.com", "friend"),
    ("Lawrence Bottom", "010052-85-92", "abc@mail.com", "friend"),
    ("Colette Irmeger", "061 832 07-35", "abc@mail.com", "friend"),
    ("Holley Mandrell", "042360 05232 14", "abc@mail.com", "friend"),
    ("Latrisha Trotman", "003597 69170 74", "abc@mail.com", "friend"),
    ("Dorsey Bertling", "02056207 451", "abc@mail.com", "friend"),
    ("Ronny Knoth", "08302 032-61-50", "abc@mail.com", "friend"),
    ("Sondra Spilker", "071 765-53-80", "abc@mail.com", "friend"),
    ("Theodore Ty", "07814 352-7 85", "abc@mail.com", "friend"),
    ("Donald Borgman", "0643 19 4761", "abc@mail.com", "friend"),
    ("Cortez Rodeheaver", "0297625-9 65", "abc@mail.com", "friend"),
    ("Tracy Weisenfels", "06304-62 60", "abc@mail.com", "friend"),
    ("Wilbert Cardonia", "0543615 01 62", "abc@mail.com", "friend"),
    ("Soila Queja", "047-8091037", "abc@mail.com", "friend"),
    ("Evelina Barge", "0972 160 20 2", "abc@mail.com", "friend"),
    ("Tisha Mccarry", "090073-63-42", "abc@mail.com", "friend"),
];

/// The demo address book as unsaved contacts
pub fn demo_contacts() -> Vec<Contact> {
    DEMO_CONTACTS
        .iter()
        .map(|&(name, phone, email, relationship)| {
            Contact::new(name, phone)
                .with_email(email)
                .with_relationship(relationship)
        })
        .collect()
}
