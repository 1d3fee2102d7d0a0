// Dialogue text, one table per conversation.

use crate::dialogue::Line;

const ANA: &str = "Ana";
const ALEXANDRE: &str = "Alexandre";
const PHONE: &str = "Phone";
const ANA_SMS: &str = "Ana (SMS)";
const SYSTEM: &str = "System";
const ANA_CALL: &str = "Ana (call)";
const ALEXANDRE_CALL: &str = "Alexandre (call)";

pub fn lines(table: &[(&str, &str)]) -> Vec<Line> {
    table
        .iter()
        .map(|(speaker, text)| Line::new(*speaker, *text))
        .collect()
}

pub const FIRST_MEETING: &[(&str, &str)] = &[
    (ANA, "What are you looking at?"),
    (ALEXANDRE, "Nothing... I just thought your headband was pretty."),
    (ANA, "Thanks!"),
    (ALEXANDRE, "Nice to meet you, I'm Alexandre."),
    (ANA, "Hmm... I'm Ana Paula."),
    (ALEXANDRE, "Nice to meet you, Paulinha 😊"),
    (ANA, "I hate being called Paulinha 😒"),
    (ALEXANDRE, "My bad 🥲"),
    (ANA, "Are you related to Edinho?"),
    (ALEXANDRE, "Yes, he's my uncle. Why?"),
    (ANA, "That's cool... you two look alike. When I got here I thought you were him."),
    (ALEXANDRE, "So you saw me when you arrived, hehe"),
    (ANA, "I did, hehe"),
    (ALEXANDRE, "Classes are about to start! What year are you in?"),
    (ANA, "Second year. You?"),
    (ALEXANDRE, "What a coincidence, me too! Maybe it's fate 😍"),
    (ANA, "I don't know about that... hehe"),
];

pub const PIZZA_INVITE: &[(&str, &str)] = &[
    (ALEXANDRE, "Hi... long class, huh?"),
    (ANA, "Really? I didn't think it was that bad."),
    (ALEXANDRE, "My head was somewhere else... hehe"),
    (ANA, "Hmm... where?"),
    (ALEXANDRE, "Thinking about asking someone I really liked out for pizza 😁"),
    (ANA, "And who would that be? Have you worked up the courage yet?"),
    (ALEXANDRE, "Actually... I just asked."),
    (ANA, "Ohh... so it's me? hahaha"),
    (ALEXANDRE, "Who else could it be?"),
    (ALEXANDRE, "So... are you in?"),
    (ANA, "I'm in! I just can't get home too late."),
    (ALEXANDRE, "I promise to take you home early. Let's go 😄"),
];

pub const PIZZA_ORDER: &[(&str, &str)] = &[
    (ALEXANDRE, "Shall we order a pizza then? 😄 What flavour do you like?"),
    (ANA, "Four cheese, sweet pizza, chicken with cream cheese... honestly, almost anything 😂"),
    (ALEXANDRE, "Nice! I like pepperoni. As my friend Netinho says: \"peperoney pizza\" 😂🍕"),
    (ANA, "Hahaha! Deal then: half pepperoni, half four cheese 😋"),
];

pub const PIZZA_FAREWELL: &[(&str, &str)] = &[
    (ALEXANDRE, "Wow, that pizza was really good. I'd never been here before."),
    (ANA, "It really was! Where are you from?"),
    (
        ALEXANDRE,
        "Campo Novo. Well, I lived in Goiânia, but I moved here a year ago. Now I work at the Bom Jesus farm.",
    ),
    (
        ANA,
        "Ahh, that's why I'd never seen you around. I lived in Campo Novo too, but I recently moved in with my mom.",
    ),
    (
        ALEXANDRE,
        "So we were meant to meet... it didn't happen in Campo Novo, but we ended up meeting here.",
    ),
    (ANA, "True, right? hehe"),
    (ANA, "I have to go now... my mom must be worried."),
    (ALEXANDRE, "Let's go then, I'll walk you."),
    (ANA, "Oh, you don't have to."),
    (ALEXANDRE, "I insist. Besides, it's one more excuse to spend a little more time with you 😄"),
    (ANA, "Haha, okay... let's go then."),
];

pub const DOORSTEP: &[(&str, &str)] = &[
    (ANA, "Thanks for walking me home, Alexandre. Tonight was great!"),
    (ALEXANDRE, "I had a great time too, Ana. See you at school?"),
    (ANA, "Definitely! 😊"),
];

pub const TRY_KISS: &[(&str, &str)] = &[
    (ALEXANDRE, "(You lean in for a kiss)"),
    (ANA, "Hey, easy there! hehe. We just met, Alexandre."),
    (ANA, "Maybe on our next date? 😉"),
    (ALEXANDRE, "Sorry, I guess I got a little carried away hehe"),
    (ANA, "Relax 😊"),
];

pub const SAY_GOODBYE: &[(&str, &str)] = &[
    (ALEXANDRE, "I'll let you go in. Good night, Ana!"),
    (ANA, "Wait, leaving already? Aren't you forgetting to ask me something? hehe"),
];

pub const ASK_NUMBER: &[(&str, &str)] = &[
    (ALEXANDRE, "I really liked meeting you... could I get your number?"),
    (ANA, "Sure! Write it down. Send me a \"hi\" later, okay?"),
    (
        ANA,
        "I might take a while to answer, the signal around here is awful... it only works in a few spots.",
    ),
    (ALEXANDRE, "What are you doing tomorrow?"),
    (ANA, "Working until noon, after that I don't know yet 😊"),
    (ALEXANDRE, "Okay, call me if you have some time, I'd love to see you again 😉"),
    (ANA, "Text me later and I'll save your number too."),
    (ALEXANDRE, "Will do! Good night, Ana."),
    (ANA, "Bye! Good night 😘"),
];

pub const TEXT_SENT: &[(&str, &str)] = &[(
    ALEXANDRE,
    "Glad I got signal 😎. Now I can head home in peace.",
)];

pub const TEXT_TO_ANA: &str = "Hi Ana, I'm home! Thanks for today.";

pub const MESSAGE_READ: &[(&str, &str)] = &[(
    PHONE,
    "💌 New message from Alexandre: \"Just so you don't forget me, I'll be thinking of you, I loved our night. Kisses\"",
)];

pub const SATURDAY: &[(&str, &str)] = &[(ANA, "Thank goodness it's Saturday, I'm free at noon 😜")];

pub const END_OF_SHIFT: &[(&str, &str)] = &[
    (ANA, "Finally, the shift is over 🙌"),
    (ANA, "I think I'll invite Alexandre for some tereré"),
    (ANA, "I just need to find phone signal, it's not working here 😒"),
];

pub const TEXT_HIM: &[(&str, &str)] = &[
    (ANA_SMS, "Hi Alexandre! I just got off work. Up for some tereré this afternoon?"),
    (SYSTEM, "Message sent!"),
];

pub const HIS_REPLY: &[(&str, &str)] = &[(
    PHONE,
    "💌 New message from Alexandre: \"Hi, Ana! Of course 😄 Meet you at the square in 20 minutes.\"",
)];

pub const CALL_HIM: &[(&str, &str)] = &[
    (ANA_CALL, "📞 Calling..."),
    (ALEXANDRE_CALL, "Hi, Ana!"),
    (
        ANA_CALL,
        "Hi, Alexandre! How are you? I just got off work and thought of you... up for some tereré?",
    ),
    (ALEXANDRE_CALL, "Hey, Ana! Of course 😄 Where should we meet?"),
    (ANA_CALL, "How about the square? I'll wait for you there in 15 minutes."),
];

pub const SECOND_DATE: &[(&str, &str)] = &[
    (ALEXANDRE, "Hi... nothing like some tereré to cool off after the day, right?"),
    (ANA, "Oh, yes! This square is so peaceful..."),
    (ALEXANDRE, "How was work today?"),
    (ANA, "Hectic. Some days I just want to run away, hehe."),
    (ALEXANDRE, "I can imagine."),
    (ANA, "Good thing today was only until noon, I can enjoy the rest of the day."),
    (ALEXANDRE, "I hope you do, because I was really looking forward to seeing you again, hehe."),
    (
        ANA,
        "Really? You didn't even text today... I got yesterday's and thought you'd talk to me today, hehe.",
    ),
    (
        ALEXANDRE,
        "I thought about it, but I was waiting for your reply. I was happy when you asked me out again today.",
    ),
    (ANA, "Good! I wasn't going to do anything important anyway, hahaha. Just kidding!"),
    (ALEXANDRE, "Now I don't know whether to be sad or happy about that, hahaha."),
    (ALEXANDRE, "But seriously... I really like you. I don't think I've ever met anyone like you."),
    (ANA, "Wow, you're quick... straight to the point."),
    (ANA, "Are you telling me there were no nice girls in Goiânia?"),
    (
        ALEXANDRE,
        "Not like you. I can't explain it, but when I saw you at school I felt something different.",
    ),
    (ALEXANDRE, "I mean it."),
    (ANA, "Hmm... sure. I bet you say that to every girl, hehe."),
    (ANA, "I heard there was already a girl interested in you."),
    (ALEXANDRE, "Who? Daiane?"),
    (ANA, "See? You even remember her name."),
    (ALEXANDRE, "She did talk to me, but she knows I'm not interested. I made that clear, hehe."),
    (ANA, "I'll pretend I believe you."),
    (ALEXANDRE, "And you? How's your love life? hehe."),
    (ANA, "A bit complicated... I was dating someone, but we're on a break."),
    (ALEXANDRE, "Oh... I don't want to get in the way, okay?"),
    (
        ANA,
        "You're not. I think it had run its course. He doesn't even live here, it was long distance.",
    ),
    (ALEXANDRE, "Then I just hope you do what's best for you."),
    (ANA, "Me too."),
    (ALEXANDRE, "It's getting late..."),
    (ANA, "True. My parents will wonder if I take too long."),
    (ALEXANDRE, "So how about this... Monday after class, we meet again?"),
    (ANA, "At night?"),
    (ALEXANDRE, "At night. We'll go grab a snack."),
    (ANA, "Deal then."),
    (ALEXANDRE, "Come on, I'll walk you home."),
    (ANA, "My parents will find it odd, you walking me home again... they already asked about you yesterday, hehe."),
    (ALEXANDRE, "Then I'd better get ready to meet my future in-laws."),
    (ANA, "hahahaha"),
    (ANA, "Let's go then."),
];

pub const DOORSTEP_AGAIN: &[(&str, &str)] = &[
    (ANA, "Thanks for walking me home again. Our afternoon was great... I loved it 😁"),
    (ALEXANDRE, "I really enjoyed it too. It couldn't have been better."),
    (ANA, "Definitely! 😊"),
    (ALEXANDRE, "Well, it could... but let's leave that for another day."),
    (ANA, "That's true. Alright then... take care on the road."),
    (ALEXANDRE, "You too. Good night."),
];

pub const MONDAY_CHAT: &[(&str, &str)] = &[
    (ANA, "Hi, I'm a bit late today 😁"),
    (ALEXANDRE, "I noticed, I thought you weren't coming, but now I know why it took so long."),
    (ANA, "Why?"),
    (ALEXANDRE, "You look amazing 😍💕"),
    (ANA, "Oh, you 😂 I look the same as every other day"),
    (ALEXANDRE, "Exactly."),
    (ANA, "Are we still going to Alemão's after class?"),
    (ALEXANDRE, "Of course."),
    (ANA, "Let's go to the classroom, the bell's about to ring."),
    (ALEXANDRE, "Let's go."),
];

pub const SNACK_BAR: &[(&str, &str)] = &[
    (ALEXANDRE, "So, what did you do on Sunday?"),
    (ANA, "Some chores at home, I was really tired, I went to bed early"),
    (ANA, "And you?"),
    (ALEXANDRE, "I spent the whole day on the computer"),
    (ANA, "Oh, you 😂 You didn't even text me"),
    (ALEXANDRE, "I didn't want to smother you hehe."),
    (ANA, "Never."),
    (ALEXANDRE, "Alright then, I won't leave you alone anymore 🤣"),
    (ANA, "I'd like to see that."),
    (ALEXANDRE, "Let's go."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversations_keep_their_length() {
        assert_eq!(FIRST_MEETING.len(), 17);
        assert_eq!(PIZZA_INVITE.len(), 12);
        assert_eq!(PIZZA_FAREWELL.len(), 11);
        assert_eq!(ASK_NUMBER.len(), 9);
        assert_eq!(SECOND_DATE.len(), 39);
        assert_eq!(MONDAY_CHAT.len(), 10);
        assert_eq!(SNACK_BAR.len(), 10);
    }

    #[test]
    fn every_line_has_a_speaker_and_text() {
        let tables = [
            FIRST_MEETING,
            PIZZA_INVITE,
            PIZZA_ORDER,
            PIZZA_FAREWELL,
            DOORSTEP,
            TRY_KISS,
            SAY_GOODBYE,
            ASK_NUMBER,
            TEXT_SENT,
            MESSAGE_READ,
            SATURDAY,
            END_OF_SHIFT,
            TEXT_HIM,
            HIS_REPLY,
            CALL_HIM,
            SECOND_DATE,
            DOORSTEP_AGAIN,
            MONDAY_CHAT,
            SNACK_BAR,
        ];
        for table in tables {
            for line in lines(table) {
                assert!(!line.speaker.is_empty());
                assert!(!line.text.is_empty());
            }
        }
    }
}
